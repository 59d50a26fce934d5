#[path = "helpers/mod.rs"]
mod helpers;

use std::sync::Arc;

use fonon_admin::{FieldController, ResourceKey, SaveOutcome};
use fonon_core::{AppError, ResourceService};
use helpers::{image, record, setup_page, MemoryResourceService, ServiceCall, CDN};
use serde_json::{json, Value};

fn nav_tree() -> Vec<Value> {
    vec![
        json!({"id": 1, "nameUz": "Bosh", "slug": "bosh", "children": [
            {"id": 2, "nameUz": "Kurslar", "slug": "kurslar", "parent": {"id": 1}, "children": [
                {"id": 3, "nameUz": "Gitara", "slug": "gitara", "parent": {"id": 2}, "children": []}
            ]}
        ]}),
        json!({"id": 4, "nameUz": "Aloqa", "slug": "aloqa", "children": []}),
    ]
}

fn option_values(page: &fonon_admin::ResourcePage, field: &str) -> Vec<(String, String)> {
    match page.form().field(field) {
        Some(FieldController::Select(c)) => c
            .field()
            .options
            .iter()
            .map(|o| (o.label.clone(), o.value.clone()))
            .collect(),
        other => panic!("{} is not a select: {:?}", field, other),
    }
}

#[tokio::test]
async fn test_nav_item_rows_follow_the_tree() {
    let mut t = setup_page(ResourceKey::NavItems, nav_tree());
    let rows = t.page.rows().await.unwrap();
    let names: Vec<&str> = rows.iter().map(|row| row[1].as_str()).collect();
    assert_eq!(names, vec!["Bosh", "— Kurslar", "— — Gitara", "Aloqa"]);
    assert_eq!(rows[2][2], "gitara");
}

#[tokio::test]
async fn test_add_child_nav_item() {
    let mut t = setup_page(ResourceKey::NavItems, nav_tree());
    let parent = record(nav_tree()[0]["children"][0].clone());

    t.page.open_create_child(&parent).unwrap();
    t.page.load_options().await.unwrap();
    assert_eq!(t.page.form().values()["parentId"], json!(2));

    let options = option_values(&t.page, "parentId");
    assert_eq!(options[0], ("Ota element yo‘q".to_string(), String::new()));
    assert_eq!(options.len(), 5);

    let form = t.page.form_mut();
    form.input("nameUz", "Pianino").unwrap();
    form.input("slug", "pianino").unwrap();
    let outcome = t.page.submit().await.unwrap();
    assert_eq!(outcome, SaveOutcome::Created);

    assert_eq!(
        Value::Object(t.service.last_payload().unwrap()),
        json!({"nameUz": "Pianino", "slug": "pianino", "parent": {"id": 2}})
    );
}

#[tokio::test]
async fn test_editing_nav_item_cannot_become_its_own_descendant() {
    let mut t = setup_page(ResourceKey::NavItems, nav_tree());
    let editing = record(nav_tree()[0]["children"][0].clone());

    t.page.open_edit(editing);
    t.page.load_options().await.unwrap();
    assert_eq!(t.page.form().values()["parentId"], json!(1));

    let values: Vec<String> = option_values(&t.page, "parentId")
        .into_iter()
        .map(|(_, value)| value)
        .collect();
    assert_eq!(values, vec!["", "1", "4"]);

    // Moving the item to the root clears the parent reference.
    t.page.form_mut().input("parentId", fonon_admin::fields::EMPTY_OPTION_VALUE).unwrap();
    t.page.submit().await.unwrap();
    let calls = t.service.calls();
    let Some(ServiceCall::Update(id, payload)) = calls.last() else {
        panic!("expected an update call");
    };
    assert_eq!(*id, 2);
    assert!(!payload.contains_key("parent"));
}

#[tokio::test]
async fn test_add_child_needs_a_nesting_resource() {
    let mut t = setup_page(ResourceKey::Appointments, vec![]);
    let err = t.page.open_create_child(&record(json!({"id": 1}))).unwrap_err();
    assert!(matches!(err, AppError::InvalidInput(_)));
    assert!(!t.page.is_dialog_open());

    let mut t = setup_page(ResourceKey::NavItems, vec![]);
    let err = t.page.open_create_child(&record(json!({"slug": "bosh"}))).unwrap_err();
    assert!(matches!(err, AppError::InvalidInput(_)));
}

#[tokio::test]
async fn test_appointment_service_selects_use_related_records() {
    let appointments = MemoryResourceService::with_records(vec![
        json!({"id": 2, "titleUz": "Maslahat", "type": "personality"}),
        json!({"id": 3, "type": "store"}),
    ]);
    let locations = MemoryResourceService::with_records(vec![json!({"id": 6, "nameUz": "Chilonzor"})]);

    let mut t = setup_page(ResourceKey::AppointmentServices, vec![]);
    t.page = t
        .page
        .with_related(ResourceKey::Appointments, appointments.clone() as Arc<dyn ResourceService>)
        .with_related(ResourceKey::Locations, locations.clone() as Arc<dyn ResourceService>);

    t.page.open_create();
    t.page.load_options().await.unwrap();
    assert_eq!(
        option_values(&t.page, "appointmentId"),
        vec![
            ("Maslahat".to_string(), "2".to_string()),
            ("Appointment #3".to_string(), "3".to_string()),
        ]
    );
    assert_eq!(option_values(&t.page, "locationId"), vec![("Chilonzor".to_string(), "6".to_string())]);
    assert_eq!(appointments.list_calls(), 1);
    assert_eq!(t.service.list_calls(), 0);

    let form = t.page.form_mut();
    form.input("titleUz", "Seans").unwrap();
    form.input("date", "2024-06-01").unwrap();
    form.input("time", "14:30").unwrap();
    let err = t.page.submit().await.unwrap_err();
    let paths: Vec<String> = err.field_issues().iter().map(|i| i.path.clone()).collect();
    assert_eq!(paths, vec!["appointmentId", "locationId"]);

    let form = t.page.form_mut();
    form.input("appointmentId", "2").unwrap();
    form.input("locationId", "6").unwrap();
    t.page.submit().await.unwrap();
    assert_eq!(
        Value::Object(t.service.last_payload().unwrap()),
        json!({
            "appointment": {"id": 2},
            "location": {"id": 6},
            "titleUz": "Seans",
            "date": "2024-06-01",
            "time": {"hour": 14, "minute": 30, "second": 0, "nano": 0}
        })
    );
}

#[tokio::test]
async fn test_missing_related_service_is_reported() {
    let mut t = setup_page(ResourceKey::ClientDetails, vec![]);
    t.page.open_create();
    let err = t.page.load_options().await.unwrap_err();
    assert!(matches!(err, AppError::Config(_)));
}

#[tokio::test]
async fn test_nav_item_product_image_follows_upload_lifecycle() {
    let mut t = setup_page(ResourceKey::NavItemProducts, vec![]);
    t.page.open_create();
    let outcome = t
        .page
        .form_mut()
        .select_files("img", vec![image("p.png")])
        .await
        .unwrap();
    let url = format!("{}/files/nav-item-products/1-p.png", CDN);
    assert_eq!(outcome.uploaded, vec![url.clone()]);
    assert_eq!(t.page.form().values()["img"], json!(url));

    t.page.cancel().await;
    assert_eq!(t.store.deletes(), vec!["nav-item-products/1-p.png"]);

    t.page.open_create();
    t.page
        .form_mut()
        .select_files("img", vec![image("q.png")])
        .await
        .unwrap();
    t.page.form_mut().input("link", "https://fonon.uz/shop").unwrap();
    t.page.submit().await.unwrap();
    assert_eq!(t.store.deletes().len(), 1);
    assert_eq!(
        Value::Object(t.service.last_payload().unwrap()),
        json!({
            "img": format!("{}/files/nav-item-products/2-q.png", CDN),
            "link": "https://fonon.uz/shop"
        })
    );
}
