//! Static resource registry.

use std::sync::LazyLock;

use fonon_core::{AppResult, Record};
use serde_json::{json, Value};

use super::config::{CellFormat, ColumnDef, PreviewSource, ResourceConfig, ResourceKey};
use super::forms::{
    AboutForm, AppointmentForm, AppointmentServiceForm, ClientDetailsForm, ContactForm, FamousForm, GalleryForm,
    JobRequestForm, JournalForm, LocationForm, NavItemForm, NavItemProductForm, NewsForm, UserEmailForm,
    VacancyForm,
};
use super::relations::OptionSource;
use super::schema::TypedSchema;
use super::transforms;
use crate::fields::{
    ArrayField, FieldDescriptor, MediaUploadField, MultilingualField, MultilingualKind, SelectField,
    SelectOption, SelectValueType, SocialLinksField, UploadMode,
};
use crate::values::{first_non_empty, record_id};

static RESOURCES: LazyLock<Vec<ResourceConfig>> = LazyLock::new(|| {
    vec![
        about(),
        news(),
        gallery(),
        journal(),
        famous(),
        contacts(),
        locations(),
        user_emails(),
        vacancies(),
        job_requests(),
        nav_items(),
        nav_item_products(),
        appointments(),
        appointment_services(),
        client_details(),
    ]
});

/// Configurations are declared in `ResourceKey` order, so the key indexes them.
pub fn get_resource_config(key: ResourceKey) -> &'static ResourceConfig {
    &RESOURCES[key as usize]
}

/// Look up a configuration by its slug.
pub fn resource_by_slug(slug: &str) -> AppResult<&'static ResourceConfig> {
    let key: ResourceKey = slug.parse()?;
    Ok(get_resource_config(key))
}

/// All configurations in declaration order.
pub fn resource_list() -> &'static [ResourceConfig] {
    &RESOURCES
}

fn defaults(value: Value) -> Record {
    match value {
        Value::Object(map) => map,
        _ => Record::new(),
    }
}

fn multilingual(base_name: &str, label: &str, required: bool) -> FieldDescriptor {
    FieldDescriptor::Multilingual(MultilingualField {
        base_name: base_name.to_string(),
        label: label.to_string(),
        required,
        ..Default::default()
    })
}

fn multilingual_editor(base_name: &str, label: &str, required: bool, category: &str) -> FieldDescriptor {
    FieldDescriptor::Multilingual(MultilingualField {
        base_name: base_name.to_string(),
        label: label.to_string(),
        required,
        kind: MultilingualKind::Editor,
        upload_category: Some(category.to_string()),
        ..Default::default()
    })
}

fn media_upload(name: &str, label: &str, category: &str, mode: UploadMode, helper_text: &str) -> MediaUploadField {
    MediaUploadField {
        name: name.to_string(),
        label: label.to_string(),
        upload_category: category.to_string(),
        mode,
        accept: Some("image/*".to_string()),
        helper_text: Some(helper_text.to_string()),
        ..Default::default()
    }
}

/// Select over record ids, starting with an optional "nothing picked" entry.
fn id_select(name: &str, label: &str, empty_label: Option<&str>) -> FieldDescriptor {
    FieldDescriptor::Select(SelectField {
        name: name.to_string(),
        label: label.to_string(),
        placeholder: Some("Tanlang".to_string()),
        options: empty_label.map(|l| SelectOption::new(l, "")).into_iter().collect(),
        value_type: SelectValueType::Number,
        required: false,
    })
}

fn label_or(record: &Record, keys: &[&str], fallback: &str) -> String {
    first_non_empty(record, keys).unwrap_or_else(|| {
        let id = record_id(record).map(|id| id.to_string()).unwrap_or_default();
        format!("{} #{}", fallback, id)
    })
}

fn nav_item_label(record: &Record) -> String {
    first_non_empty(record, &["nameUz", "slug"]).unwrap_or_default()
}

fn nav_item_product_label(record: &Record) -> String {
    record
        .get("navitem")
        .and_then(Value::as_object)
        .and_then(|nav| first_non_empty(nav, &["nameUz"]))
        .or_else(|| first_non_empty(record, &["link", "img"]))
        .unwrap_or_else(|| "Unknown".to_string())
}

fn appointment_label(record: &Record) -> String {
    label_or(record, &["titleUz"], "Appointment")
}

fn location_label(record: &Record) -> String {
    label_or(record, &["nameUz"], "Location")
}

fn service_label(record: &Record) -> String {
    label_or(record, &["titleUz"], "Service")
}

fn id_column() -> ColumnDef {
    ColumnDef::plain("id", "ID")
}

fn created_column() -> ColumnDef {
    ColumnDef::formatted("createdAt", "Yaratildi", CellFormat::DateTime)
}

fn title_column() -> ColumnDef {
    ColumnDef::plain("titleUz", "Sarlavha (UZ)")
}

fn about() -> ResourceConfig {
    ResourceConfig {
        key: ResourceKey::About,
        title: "About bo‘limi",
        description: Some("Fonon haqida ma’lumotlar bloki."),
        endpoint: "/api/about-sections",
        columns: vec![
            id_column(),
            title_column(),
            ColumnDef::plain("slug", "Slug"),
            created_column(),
            ColumnDef::formatted("updatedAt", "Yangilandi", CellFormat::DateTime),
        ],
        schema: Box::new(TypedSchema::<AboutForm>::new()),
        default_values: defaults(json!({
            "titleUz": "", "titleRu": "", "titleEn": "",
            "bodyUz": "", "bodyRu": "", "bodyEn": "",
            "slug": "",
            "images": []
        })),
        fields: vec![
            multilingual("title", "Sarlavha", true),
            multilingual_editor("body", "Matn", true, "about"),
            FieldDescriptor::text("slug", "Slug").required().placeholder("about-slug"),
            FieldDescriptor::MediaUpload(media_upload(
                "images",
                "Rasmlar",
                "about",
                UploadMode::Multiple,
                "Rasmlar tanlanganda darhol yuklanadi, kerak bo‘lsa ro‘yxatdan o‘chirib tashlang.",
            )),
        ],
        to_form_values: Some(transforms::about_form_values),
        to_payload: Some(transforms::about_payload),
        preview: None,
        option_sources: Vec::new(),
        parent_field: None,
        tree_children: None,
    }
}

fn news() -> ResourceConfig {
    ResourceConfig {
        key: ResourceKey::News,
        title: "Yangiliklar",
        description: Some("Yangiliklarni boshqarish."),
        endpoint: "/api/news",
        columns: vec![
            id_column(),
            title_column(),
            ColumnDef::formatted("publishedAt", "E’lon qilingan", CellFormat::DateTime),
            created_column(),
        ],
        schema: Box::new(TypedSchema::<NewsForm>::new()),
        default_values: defaults(json!({
            "titleUz": "", "titleRu": "", "titleEn": "",
            "bodyUz": "", "bodyRu": "", "bodyEn": "",
            "images": [],
            "publishedAt": ""
        })),
        fields: vec![
            multilingual("title", "Sarlavha", true),
            multilingual_editor("body", "Matn", true, "news"),
            FieldDescriptor::MediaUpload(media_upload(
                "images",
                "Rasmlar",
                "news",
                UploadMode::Multiple,
                "Rasmlar tanlanganda darhol yuklanadi, kerak bo‘lsa ro‘yxatdan o‘chirib tashlang.",
            )),
            FieldDescriptor::date("publishedAt", "E’lon sanasi"),
        ],
        to_form_values: Some(transforms::news_form_values),
        to_payload: Some(transforms::news_payload),
        preview: None,
        option_sources: Vec::new(),
        parent_field: None,
        tree_children: None,
    }
}

fn gallery() -> ResourceConfig {
    let mut media = media_upload(
        "url",
        "Media fayl",
        "gallery",
        UploadMode::Single,
        "Fayl tanlansa darhol serverga yuklanadi, bekor qilinsa yangi yuklangan fayl o‘chirib tashlanadi.",
    );
    media.media_type_field = Some("mediaType".to_string());
    media.manual_input_when = vec!["video".to_string()];
    media.manual_input_placeholder = Some("https://www.youtube.com/watch?v=...".to_string());
    media.manual_input_helper_text =
        Some("Faqat YouTube havolasini kiriting, avtomatik embed formatga o‘zgartiriladi.".to_string());

    ResourceConfig {
        key: ResourceKey::Gallery,
        title: "Galereya",
        description: Some("Media fayllar boshqaruvi."),
        endpoint: "/api/gallery",
        columns: vec![
            id_column(),
            ColumnDef::plain("title", "Sarlavha"),
            ColumnDef::formatted("mediaType", "Turi", CellFormat::MediaKindLabel),
            ColumnDef::plain("url", "URL"),
            created_column(),
        ],
        schema: Box::new(TypedSchema::<GalleryForm>::new()),
        default_values: defaults(json!({"title": "", "url": "", "mediaType": "image"})),
        fields: vec![
            FieldDescriptor::text("title", "Sarlavha").required(),
            FieldDescriptor::MediaUpload(media),
        ],
        to_form_values: Some(transforms::gallery_form_values),
        to_payload: Some(transforms::gallery_payload),
        preview: Some(PreviewSource::Url),
        option_sources: Vec::new(),
        parent_field: None,
        tree_children: None,
    }
}

fn journal() -> ResourceConfig {
    ResourceConfig {
        key: ResourceKey::Journal,
        title: "Journal",
        description: Some("Jurnal yozuvlari."),
        endpoint: "/api/journals",
        columns: vec![
            id_column(),
            ColumnDef::plain("image", "Rasm"),
            created_column(),
        ],
        schema: Box::new(TypedSchema::<JournalForm>::new()),
        default_values: defaults(json!({"image": ""})),
        fields: vec![FieldDescriptor::MediaUpload(media_upload(
            "image",
            "Rasm",
            "journal",
            UploadMode::Single,
            "Rasm tanlanganda darhol yuklanadi, kerak bo‘lsa o‘chirib tashlang.",
        ))],
        to_form_values: Some(transforms::journal_form_values),
        to_payload: Some(transforms::journal_payload),
        preview: Some(PreviewSource::Image),
        option_sources: Vec::new(),
        parent_field: None,
        tree_children: None,
    }
}

fn famous() -> ResourceConfig {
    ResourceConfig {
        key: ResourceKey::Famous,
        title: "Famous",
        description: Some("Mashhur mijozlar haqida ma’lumot."),
        endpoint: "/api/famous",
        columns: vec![id_column(), title_column(), created_column()],
        schema: Box::new(TypedSchema::<FamousForm>::new()),
        default_values: defaults(json!({
            "titleUz": "", "titleRu": "", "titleEn": "",
            "bodyUz": "", "bodyRu": "", "bodyEn": "",
            "images": [],
            "slug": ""
        })),
        fields: vec![
            multilingual("title", "Sarlavha", true),
            multilingual_editor("body", "Matn", true, "famous"),
            FieldDescriptor::text("slug", "Slug").required().placeholder("famous-slug"),
            FieldDescriptor::MediaUpload(media_upload(
                "images",
                "Rasmlar",
                "famous",
                UploadMode::Multiple,
                "Rasmlar tanlanganda darhol yuklanadi, bekor qilsangiz yangi yuklanganlar o‘chirib tashlanadi.",
            )),
        ],
        to_form_values: Some(transforms::famous_form_values),
        to_payload: Some(transforms::famous_payload),
        preview: None,
        option_sources: Vec::new(),
        parent_field: None,
        tree_children: None,
    }
}

fn contacts() -> ResourceConfig {
    ResourceConfig {
        key: ResourceKey::Contacts,
        title: "Kontaktlar",
        description: Some("Kontakt ma’lumotlari."),
        endpoint: "/api/contacts",
        columns: vec![
            id_column(),
            ColumnDef::plain("phoneNumber", "Telefon"),
            ColumnDef::plain("email", "Email"),
            ColumnDef::plain("address", "Manzil"),
            created_column(),
        ],
        schema: Box::new(TypedSchema::<ContactForm>::new()),
        default_values: defaults(json!({
            "phoneNumber": "",
            "email": "",
            "address": "",
            "socialMedia": []
        })),
        fields: vec![
            FieldDescriptor::text("phoneNumber", "Telefon").required(),
            FieldDescriptor::text("email", "Email").required(),
            FieldDescriptor::text("address", "Manzil").required(),
            FieldDescriptor::SocialLinks(SocialLinksField {
                name: "socialMedia".to_string(),
                label: "Ijtimoiy tarmoqlar".to_string(),
                upload_category: "contacts".to_string(),
                helper_text: Some("Har bir ijtimoiy tarmoq uchun ikonka yuklang va havolani kiriting.".to_string()),
            }),
        ],
        to_form_values: Some(transforms::contacts_form_values),
        to_payload: Some(transforms::contacts_payload),
        preview: None,
        option_sources: Vec::new(),
        parent_field: None,
        tree_children: None,
    }
}

fn locations() -> ResourceConfig {
    ResourceConfig {
        key: ResourceKey::Locations,
        title: "Filiallar",
        description: Some("Lokatsiyalar va ish vaqtlari."),
        endpoint: "/api/locations",
        columns: vec![
            id_column(),
            ColumnDef::plain("nameUz", "Nom (UZ)"),
            ColumnDef::formatted("openTime", "Ochilish", CellFormat::LocalTime),
            ColumnDef::formatted("closeTime", "Yopilish", CellFormat::LocalTime),
            ColumnDef::formatted("workDays", "Ish kunlari", CellFormat::JoinList),
        ],
        schema: Box::new(TypedSchema::<LocationForm>::new()),
        default_values: defaults(json!({
            "nameUz": "", "nameRu": "", "nameEn": "",
            "mapTag": "",
            "openTime": "",
            "closeTime": "",
            "workDays": [],
            "address": "",
            "images": []
        })),
        fields: vec![
            multilingual("name", "Nom", true),
            FieldDescriptor::text("mapTag", "Map tag"),
            FieldDescriptor::time("openTime", "Ochilish vaqti"),
            FieldDescriptor::time("closeTime", "Yopilish vaqti"),
            FieldDescriptor::Array(ArrayField {
                name: "workDays".to_string(),
                label: "Ish kunlari".to_string(),
                item_label: Some("Kun".to_string()),
                ..Default::default()
            }),
            FieldDescriptor::text("address", "Manzil").required(),
            FieldDescriptor::MediaUpload(MediaUploadField {
                accept: None,
                ..media_upload(
                    "images",
                    "Rasmlar",
                    "locations",
                    UploadMode::Multiple,
                    "Rasmlar yuklanganda serverga jo‘natiladi, bekor qilinsachi yangi yuklangan fayllar o‘chiriladi.",
                )
            }),
        ],
        to_form_values: Some(transforms::locations_form_values),
        to_payload: Some(transforms::locations_payload),
        preview: None,
        option_sources: Vec::new(),
        parent_field: None,
        tree_children: None,
    }
}

fn user_emails() -> ResourceConfig {
    ResourceConfig {
        key: ResourceKey::UserEmails,
        title: "Foydalanuvchi xatlari",
        description: Some("Email ro‘yxati."),
        endpoint: "/api/user-emails",
        columns: vec![id_column(), ColumnDef::plain("email", "Email"), created_column()],
        schema: Box::new(TypedSchema::<UserEmailForm>::new()),
        default_values: defaults(json!({"email": ""})),
        fields: vec![FieldDescriptor::text("email", "Email").required()],
        to_form_values: None,
        to_payload: None,
        preview: None,
        option_sources: Vec::new(),
        parent_field: None,
        tree_children: None,
    }
}

fn vacancies() -> ResourceConfig {
    ResourceConfig {
        key: ResourceKey::Vacancies,
        title: "Bo‘sh ish o‘rinlari",
        description: Some("Vakansiyalar boshqaruvi."),
        endpoint: "/api/vacancies",
        columns: vec![
            id_column(),
            title_column(),
            ColumnDef::plain("location", "Joylashuv"),
            ColumnDef::formatted("deadline", "Deadline", CellFormat::Date),
            ColumnDef::formatted("active", "Aktiv", CellFormat::YesNo),
        ],
        schema: Box::new(TypedSchema::<VacancyForm>::new()),
        // Salaries start absent, not zero.
        default_values: defaults(json!({
            "titleUz": "", "titleRu": "", "titleEn": "",
            "bodyUz": "", "bodyRu": "", "bodyEn": "",
            "location": "",
            "employmentType": "",
            "salaryMin": null,
            "salaryMax": null,
            "deadline": "",
            "active": true
        })),
        fields: vec![
            multilingual("title", "Sarlavha", true),
            multilingual_editor("body", "Mazmun", false, "vacancies"),
            FieldDescriptor::text("location", "Joylashuv").required(),
            FieldDescriptor::text("employmentType", "Bandlik turi"),
            FieldDescriptor::number("salaryMin", "Minimal maosh"),
            FieldDescriptor::number("salaryMax", "Maksimal maosh"),
            FieldDescriptor::date("deadline", "Deadline"),
            FieldDescriptor::boolean("active", "Faol"),
        ],
        to_form_values: None,
        to_payload: None,
        preview: None,
        option_sources: Vec::new(),
        parent_field: None,
        tree_children: None,
    }
}

fn job_requests() -> ResourceConfig {
    ResourceConfig {
        key: ResourceKey::JobRequests,
        title: "Ish so‘rovlari",
        description: Some("Vakansiya arizalari."),
        endpoint: "/api/job-requests",
        columns: vec![
            id_column(),
            ColumnDef::plain("firstName", "Ism"),
            ColumnDef::plain("lastName", "Familiya"),
            ColumnDef::plain("phoneNumber", "Telefon"),
            ColumnDef::plain("email", "Email"),
            created_column(),
        ],
        schema: Box::new(TypedSchema::<JobRequestForm>::new()),
        default_values: defaults(json!({
            "firstName": "",
            "lastName": "",
            "phoneNumber": "",
            "email": "",
            "file": "",
            "position": ""
        })),
        fields: vec![
            FieldDescriptor::text("firstName", "Ism").required(),
            FieldDescriptor::text("lastName", "Familiya").required(),
            FieldDescriptor::text("phoneNumber", "Telefon").required(),
            FieldDescriptor::text("email", "Email").required(),
            FieldDescriptor::text("position", "Lavozim"),
            FieldDescriptor::MediaUpload(MediaUploadField {
                accept: Some("image/*,application/pdf".to_string()),
                upload_button_label: Some("Fayl".to_string()),
                counter_label: Some("fayl".to_string()),
                ..media_upload(
                    "file",
                    "Fayl",
                    "job-requests",
                    UploadMode::Single,
                    "Fayl tanlanganda darhol yuklanadi. Bekor qilish tugmasi bosilsa, fayl avtomatik o‘chiriladi.",
                )
            }),
        ],
        to_form_values: None,
        to_payload: None,
        preview: None,
        option_sources: Vec::new(),
        parent_field: None,
        tree_children: None,
    }
}

fn nav_items() -> ResourceConfig {
    ResourceConfig {
        key: ResourceKey::NavItems,
        title: "Nav Itemlar",
        description: Some("Sayt navigatsiyasi daraxti."),
        endpoint: "/api/nav-items",
        columns: vec![
            id_column(),
            ColumnDef::formatted("nameUz", "Nom (UZ)", CellFormat::TreeLabel),
            ColumnDef::plain("slug", "Slug"),
        ],
        schema: Box::new(TypedSchema::<NavItemForm>::new()),
        default_values: defaults(json!({
            "nameUz": "", "nameRu": "", "nameEn": "",
            "slug": "",
            "parentId": null
        })),
        fields: vec![
            multilingual("name", "Nom", true),
            FieldDescriptor::text("slug", "Slug").required().placeholder("nav-item-slug"),
            id_select("parentId", "Ota element", Some("Ota element yo‘q")),
        ],
        to_form_values: Some(transforms::nav_item_form_values),
        to_payload: Some(transforms::nav_item_payload),
        preview: None,
        option_sources: vec![OptionSource {
            field: "parentId",
            resource: ResourceKey::NavItems,
            children_key: Some("children"),
            label: nav_item_label,
        }],
        parent_field: Some("parentId"),
        tree_children: Some("children"),
    }
}

fn nav_item_products() -> ResourceConfig {
    ResourceConfig {
        key: ResourceKey::NavItemProducts,
        title: "Nav Item mahsulotlari",
        description: Some("Navigatsiyaga biriktirilgan mahsulotlar daraxti."),
        endpoint: "/api/nav-item-products",
        columns: vec![
            id_column(),
            ColumnDef::formatted("navitem", "NavItem", CellFormat::Nested("nameUz")),
            ColumnDef::formatted("link", "Havola", CellFormat::TreeLabel),
            ColumnDef::plain("img", "Rasm"),
        ],
        schema: Box::new(TypedSchema::<NavItemProductForm>::new()),
        default_values: defaults(json!({
            "navItemId": null,
            "parentId": null,
            "img": "",
            "link": ""
        })),
        fields: vec![
            id_select("navItemId", "Bog‘langan NavItem", Some("Tanlanmagan")),
            id_select("parentId", "Ota product", Some("Root")),
            FieldDescriptor::MediaUpload(media_upload(
                "img",
                "Rasm",
                "nav-item-products",
                UploadMode::Single,
                "Rasm tanlanganda darhol yuklanadi, bekor qilinsa o‘chirib tashlanadi.",
            )),
            FieldDescriptor::text("link", "Havola").placeholder("https://"),
        ],
        to_form_values: Some(transforms::nav_item_product_form_values),
        to_payload: Some(transforms::nav_item_product_payload),
        preview: None,
        option_sources: vec![
            OptionSource {
                field: "navItemId",
                resource: ResourceKey::NavItems,
                children_key: Some("children"),
                label: nav_item_label,
            },
            OptionSource {
                field: "parentId",
                resource: ResourceKey::NavItemProducts,
                children_key: Some("children"),
                label: nav_item_product_label,
            },
        ],
        parent_field: Some("parentId"),
        tree_children: Some("children"),
    }
}

fn appointments() -> ResourceConfig {
    ResourceConfig {
        key: ResourceKey::Appointments,
        title: "Appointments",
        description: Some("Murakkab appointment sozlamalari va xizmatlar."),
        endpoint: "/api/appointments",
        columns: vec![
            id_column(),
            title_column(),
            ColumnDef::plain("type", "Turi"),
            created_column(),
        ],
        schema: Box::new(TypedSchema::<AppointmentForm>::new()),
        default_values: defaults(json!({
            "type": "personality",
            "titleUz": "", "titleRu": "", "titleEn": ""
        })),
        fields: vec![
            FieldDescriptor::Select(SelectField {
                name: "type".to_string(),
                label: "Appointment turi".to_string(),
                placeholder: None,
                options: vec![
                    SelectOption::new("Personality", "personality"),
                    SelectOption::new("Store", "store"),
                ],
                value_type: SelectValueType::String,
                required: true,
            }),
            multilingual("title", "Sarlavha", true),
        ],
        to_form_values: None,
        to_payload: None,
        preview: None,
        option_sources: Vec::new(),
        parent_field: None,
        tree_children: None,
    }
}

fn appointment_services() -> ResourceConfig {
    ResourceConfig {
        key: ResourceKey::AppointmentServices,
        title: "Appointment xizmatlari",
        description: Some("Xizmatlarni appointment va lokatsiyaga biriktiring."),
        endpoint: "/api/appointment-services",
        columns: vec![
            id_column(),
            ColumnDef::formatted("appointment", "Appointment", CellFormat::Nested("titleUz")),
            ColumnDef::formatted("location", "Joy", CellFormat::Nested("nameUz")),
            ColumnDef::formatted("client", "Mijoz", CellFormat::Nested("firstname")),
            ColumnDef::formatted("date", "Sana", CellFormat::Date),
            ColumnDef::formatted("time", "Vaqt", CellFormat::LocalTime),
            created_column(),
        ],
        schema: Box::new(TypedSchema::<AppointmentServiceForm>::new()),
        default_values: defaults(json!({
            "appointmentId": null,
            "locationId": null,
            "titleUz": "", "titleRu": "", "titleEn": "",
            "descriptionUz": "", "descriptionRu": "", "descriptionEn": "",
            "date": "",
            "time": ""
        })),
        fields: vec![
            id_select("appointmentId", "Appointment", None).required(),
            id_select("locationId", "Joy", None).required(),
            multilingual("title", "Sarlavha", true),
            FieldDescriptor::Multilingual(MultilingualField {
                base_name: "description".to_string(),
                label: "Tavsif".to_string(),
                kind: MultilingualKind::Textarea,
                ..Default::default()
            }),
            FieldDescriptor::date("date", "Sana").required(),
            FieldDescriptor::time("time", "Vaqt").required(),
        ],
        to_form_values: Some(transforms::appointment_service_form_values),
        to_payload: Some(transforms::appointment_service_payload),
        preview: None,
        option_sources: vec![
            OptionSource {
                field: "appointmentId",
                resource: ResourceKey::Appointments,
                children_key: None,
                label: appointment_label,
            },
            OptionSource {
                field: "locationId",
                resource: ResourceKey::Locations,
                children_key: None,
                label: location_label,
            },
        ],
        parent_field: None,
        tree_children: None,
    }
}

fn client_details() -> ResourceConfig {
    ResourceConfig {
        key: ResourceKey::ClientDetails,
        title: "Client details",
        description: Some("Mijozlar bilan ishlash bo‘limi."),
        endpoint: "/api/client-details",
        columns: vec![
            id_column(),
            ColumnDef::plain("firstname", "Ism"),
            ColumnDef::plain("lastname", "Familiya"),
            ColumnDef::plain("phoneNumber", "Telefon"),
            ColumnDef::plain("email", "Email"),
            created_column(),
        ],
        schema: Box::new(TypedSchema::<ClientDetailsForm>::new()),
        default_values: defaults(json!({
            "serviceId": null,
            "firstname": "",
            "lastname": "",
            "email": "",
            "phoneNumber": "",
            "address": "",
            "comment": ""
        })),
        fields: vec![
            id_select("serviceId", "Xizmat", None).required(),
            FieldDescriptor::text("firstname", "Ism").required(),
            FieldDescriptor::text("lastname", "Familiya").required(),
            FieldDescriptor::text("email", "Email").required(),
            FieldDescriptor::text("phoneNumber", "Telefon").required(),
            FieldDescriptor::text("address", "Manzil"),
            FieldDescriptor::textarea("comment", "Izoh"),
        ],
        to_form_values: Some(transforms::client_details_form_values),
        to_payload: Some(transforms::client_details_payload),
        preview: None,
        option_sources: vec![OptionSource {
            field: "serviceId",
            resource: ResourceKey::AppointmentServices,
            children_key: None,
            label: service_label,
        }],
        parent_field: None,
        tree_children: None,
    }
}
