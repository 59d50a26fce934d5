//! Typed form structs, one per resource.

use fonon_core::MediaKind;
use serde::{Deserialize, Serialize};
use validator::Validate;

use super::schema::{lenient_id, lenient_number, non_empty_items, whole_number};

fn default_media_kind() -> MediaKind {
    MediaKind::Image
}

fn default_true() -> bool {
    true
}

#[derive(Debug, Clone, Deserialize, Serialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct AboutForm {
    #[serde(default)]
    #[validate(length(min = 1, message = "Majburiy"))]
    pub title_uz: String,
    #[serde(default)]
    pub title_ru: String,
    #[serde(default)]
    pub title_en: String,
    #[serde(default)]
    #[validate(length(min = 1, message = "Majburiy"))]
    pub body_uz: String,
    #[serde(default)]
    pub body_ru: String,
    #[serde(default)]
    pub body_en: String,
    #[serde(default)]
    #[validate(length(min = 1, message = "Slug majburiy"))]
    pub slug: String,
    #[serde(default)]
    #[validate(custom(
        function = "non_empty_items",
        message = "Rasm URL bo‘sh bo‘lishi mumkin emas"
    ))]
    pub images: Vec<String>,
}

#[derive(Debug, Clone, Deserialize, Serialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct NewsForm {
    #[serde(default)]
    #[validate(length(min = 1, message = "Majburiy"))]
    pub title_uz: String,
    #[serde(default)]
    pub title_ru: String,
    #[serde(default)]
    pub title_en: String,
    #[serde(default)]
    #[validate(length(min = 1, message = "Majburiy"))]
    pub body_uz: String,
    #[serde(default)]
    pub body_ru: String,
    #[serde(default)]
    pub body_en: String,
    #[serde(default)]
    #[validate(custom(
        function = "non_empty_items",
        message = "Rasm URL bo‘sh bo‘lishi mumkin emas"
    ))]
    pub images: Vec<String>,
    #[serde(default)]
    pub published_at: String,
}

#[derive(Debug, Clone, Deserialize, Serialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct GalleryForm {
    #[serde(default)]
    #[validate(length(min = 1, message = "Majburiy"))]
    pub title: String,
    #[serde(default)]
    #[validate(length(min = 1, message = "Media manzilini kiriting"))]
    pub url: String,
    #[serde(default = "default_media_kind")]
    pub media_type: MediaKind,
}

#[derive(Debug, Clone, Deserialize, Serialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct JournalForm {
    #[serde(default)]
    #[validate(length(min = 1, message = "Rasm tanlang"))]
    pub image: String,
}

#[derive(Debug, Clone, Deserialize, Serialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct FamousForm {
    #[serde(default)]
    #[validate(length(min = 1, message = "Majburiy"))]
    pub title_uz: String,
    #[serde(default)]
    pub title_ru: String,
    #[serde(default)]
    pub title_en: String,
    #[serde(default)]
    #[validate(length(min = 1, message = "Majburiy"))]
    pub body_uz: String,
    #[serde(default)]
    pub body_ru: String,
    #[serde(default)]
    pub body_en: String,
    #[serde(default)]
    #[validate(custom(
        function = "non_empty_items",
        message = "Rasm URL bo‘sh bo‘lishi mumkin emas"
    ))]
    pub images: Vec<String>,
    #[serde(default)]
    #[validate(length(min = 1, message = "Slug majburiy"))]
    pub slug: String,
}

#[derive(Debug, Clone, Deserialize, Serialize, Validate)]
pub struct SocialLinkForm {
    #[serde(default)]
    #[validate(length(min = 1, message = "Platforma rasmini yuklang"))]
    pub platform: String,
    #[serde(default)]
    #[validate(url(message = "URL noto‘g‘ri"))]
    pub link: String,
}

#[derive(Debug, Clone, Deserialize, Serialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct ContactForm {
    #[serde(default)]
    #[validate(length(min = 1, message = "Majburiy"))]
    pub phone_number: String,
    #[serde(default)]
    #[validate(email(message = "Email noto‘g‘ri"))]
    pub email: String,
    #[serde(default)]
    #[validate(length(min = 1, message = "Majburiy"))]
    pub address: String,
    #[serde(default)]
    #[validate(nested)]
    pub social_media: Vec<SocialLinkForm>,
}

#[derive(Debug, Clone, Deserialize, Serialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct LocationForm {
    #[serde(default)]
    #[validate(length(min = 1, message = "Majburiy"))]
    pub name_uz: String,
    #[serde(default)]
    pub name_ru: String,
    #[serde(default)]
    pub name_en: String,
    #[serde(default)]
    pub map_tag: String,
    #[serde(default)]
    pub open_time: String,
    #[serde(default)]
    pub close_time: String,
    #[serde(default)]
    pub work_days: Vec<String>,
    #[serde(default)]
    #[validate(length(min = 1, message = "Majburiy"))]
    pub address: String,
    #[serde(default)]
    #[validate(custom(function = "non_empty_items", message = "Rasm havolasini ko‘rsating"))]
    pub images: Vec<String>,
}

#[derive(Debug, Clone, Deserialize, Serialize, Validate)]
pub struct UserEmailForm {
    #[serde(default)]
    #[validate(email(message = "Email noto‘g‘ri"))]
    pub email: String,
}

#[derive(Debug, Clone, Deserialize, Serialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct VacancyForm {
    #[serde(default)]
    #[validate(length(min = 1, message = "Majburiy"))]
    pub title_uz: String,
    #[serde(default)]
    pub title_ru: String,
    #[serde(default)]
    pub title_en: String,
    #[serde(default)]
    pub body_uz: String,
    #[serde(default)]
    pub body_ru: String,
    #[serde(default)]
    pub body_en: String,
    #[serde(default)]
    #[validate(length(min = 1, message = "Majburiy"))]
    pub location: String,
    #[serde(default)]
    pub employment_type: String,
    #[serde(
        default,
        deserialize_with = "lenient_number",
        serialize_with = "whole_number",
        skip_serializing_if = "Option::is_none"
    )]
    #[validate(range(min = 0.0, message = "Manfiy bo‘lishi mumkin emas"))]
    pub salary_min: Option<f64>,
    #[serde(
        default,
        deserialize_with = "lenient_number",
        serialize_with = "whole_number",
        skip_serializing_if = "Option::is_none"
    )]
    #[validate(range(min = 0.0, message = "Manfiy bo‘lishi mumkin emas"))]
    pub salary_max: Option<f64>,
    #[serde(default)]
    pub deadline: String,
    #[serde(default = "default_true")]
    pub active: bool,
}

#[derive(Debug, Clone, Deserialize, Serialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct JobRequestForm {
    #[serde(default)]
    #[validate(length(min = 1, message = "Majburiy"))]
    pub first_name: String,
    #[serde(default)]
    #[validate(length(min = 1, message = "Majburiy"))]
    pub last_name: String,
    #[serde(default)]
    #[validate(length(min = 1, message = "Majburiy"))]
    pub phone_number: String,
    #[serde(default)]
    #[validate(email(message = "Email noto‘g‘ri"))]
    pub email: String,
    #[serde(default)]
    pub file: String,
    #[serde(default)]
    pub position: String,
}

#[derive(Debug, Clone, Deserialize, Serialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct NavItemForm {
    #[serde(default)]
    #[validate(length(min = 1, message = "Majburiy"))]
    pub name_uz: String,
    #[serde(default)]
    pub name_ru: String,
    #[serde(default)]
    pub name_en: String,
    #[serde(default)]
    #[validate(length(min = 1, message = "Slag kerak"))]
    pub slug: String,
    #[serde(default, deserialize_with = "lenient_id", skip_serializing_if = "Option::is_none")]
    pub parent_id: Option<i64>,
}

#[derive(Debug, Clone, Deserialize, Serialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct NavItemProductForm {
    #[serde(default, deserialize_with = "lenient_id", skip_serializing_if = "Option::is_none")]
    pub nav_item_id: Option<i64>,
    #[serde(default, deserialize_with = "lenient_id", skip_serializing_if = "Option::is_none")]
    pub parent_id: Option<i64>,
    #[serde(default)]
    pub img: String,
    #[serde(default)]
    pub link: String,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum AppointmentType {
    #[default]
    Personality,
    Store,
}

#[derive(Debug, Clone, Deserialize, Serialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct AppointmentForm {
    #[serde(default, rename = "type")]
    pub kind: AppointmentType,
    #[serde(default)]
    #[validate(length(min = 1, message = "Majburiy"))]
    pub title_uz: String,
    #[serde(default)]
    pub title_ru: String,
    #[serde(default)]
    pub title_en: String,
}

#[derive(Debug, Clone, Deserialize, Serialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct AppointmentServiceForm {
    #[serde(default, deserialize_with = "lenient_id", skip_serializing_if = "Option::is_none")]
    #[validate(required(message = "Appointment tanlang"))]
    pub appointment_id: Option<i64>,
    #[serde(default, deserialize_with = "lenient_id", skip_serializing_if = "Option::is_none")]
    #[validate(required(message = "Joy tanlang"))]
    pub location_id: Option<i64>,
    #[serde(default)]
    #[validate(length(min = 1, message = "Majburiy"))]
    pub title_uz: String,
    #[serde(default)]
    pub title_ru: String,
    #[serde(default)]
    pub title_en: String,
    #[serde(default)]
    pub description_uz: String,
    #[serde(default)]
    pub description_ru: String,
    #[serde(default)]
    pub description_en: String,
    #[serde(default)]
    #[validate(length(min = 1, message = "Sana majburiy"))]
    pub date: String,
    #[serde(default)]
    #[validate(length(min = 1, message = "Vaqt majburiy"))]
    pub time: String,
}

#[derive(Debug, Clone, Deserialize, Serialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct ClientDetailsForm {
    #[serde(default, deserialize_with = "lenient_id", skip_serializing_if = "Option::is_none")]
    #[validate(required(message = "Xizmat tanlang"))]
    pub service_id: Option<i64>,
    #[serde(default)]
    #[validate(length(min = 1, message = "Majburiy"))]
    pub firstname: String,
    #[serde(default)]
    #[validate(length(min = 1, message = "Majburiy"))]
    pub lastname: String,
    #[serde(default)]
    #[validate(email(message = "Email formatida bo‘lishi kerak"))]
    pub email: String,
    #[serde(default)]
    #[validate(length(min = 1, message = "Telefon majburiy"))]
    pub phone_number: String,
    #[serde(default)]
    pub address: String,
    #[serde(default)]
    pub comment: String,
}
