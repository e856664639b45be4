/// End-to-end tests for the JSON file store
///
/// This test suite verifies:
/// 1. A graph built through the service survives a reopen, links included
/// 2. Compact and pretty documents load the same way
/// 3. A hand-edited document that breaks symmetry is refused on open
mod utils;

use campus_lib::modules::academic::ClassRoomKind;
use campus_lib::modules::campus::{CampusRepository, CampusService, JsonCampusRepository};
use campus_lib::modules::people::PersonRef;
use campus_lib::modules::relations::{EntityRef, RelationKind};
use campus_lib::shared::{AppConfig, AppError};
use campus_lib::open_campus;
use std::sync::Arc;
use tempfile::tempdir;
use utils::factories::{date, PersonFactory};
use utils::helpers;

#[tokio::test]
async fn graph_survives_a_reopen() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("campus.json");

    let (building, room, group, student) = {
        let service = CampusService::open(Arc::new(JsonCampusRepository::new(&path)))
            .await
            .unwrap();
        let building = service.create_building("A1", "Koszykowa 86").await.unwrap().id();
        let room = service
            .create_class_room("101", 30, ClassRoomKind::LectureHall)
            .await
            .unwrap()
            .id();
        let group = service.create_group("11c", 25).await.unwrap().id();
        let student = service
            .create_student(
                PersonFactory::new().build(),
                &helpers::index_number(),
                date(2023, 10, 1),
            )
            .await
            .unwrap()
            .id();

        service
            .link(
                RelationKind::BuildingClassRooms,
                EntityRef::Building(building),
                EntityRef::ClassRoom(room),
            )
            .await
            .unwrap();
        service
            .link(
                RelationKind::GroupStudents,
                EntityRef::Group(group),
                EntityRef::Person(PersonRef::Student(student)),
            )
            .await
            .unwrap();
        (building, room, group, student)
    };

    let reopened = CampusService::open(Arc::new(JsonCampusRepository::new(&path)))
        .await
        .unwrap();
    let graph = reopened.snapshot().await;

    assert_eq!(graph.entity_count(), 4);
    assert_eq!(graph.building(&building).unwrap().class_rooms(), vec![room]);
    assert_eq!(graph.class_room(&room).unwrap().building(), Some(building));
    assert_eq!(graph.student(&student).unwrap().groups(), vec![group]);
    assert!(graph.verify_integrity().is_empty());
}

#[tokio::test]
async fn compact_documents_load_like_pretty_ones() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("campus.json");
    let compact = JsonCampusRepository::new(&path).with_pretty(false);

    let service = CampusService::open(Arc::new(compact)).await.unwrap();
    service.create_group("11c", 25).await.unwrap();

    let raw = std::fs::read_to_string(&path).unwrap();
    assert!(!raw.contains('\n'));

    let loaded = JsonCampusRepository::new(&path).load().await.unwrap().unwrap();
    assert_eq!(loaded.groups().count(), 1);
}

#[tokio::test]
async fn one_sided_link_in_the_file_is_refused() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("campus.json");

    let (building, room) = {
        let service = CampusService::open(Arc::new(JsonCampusRepository::new(&path)))
            .await
            .unwrap();
        let building = service.create_building("A1", "Koszykowa 86").await.unwrap().id();
        let room = service
            .create_class_room("101", 30, ClassRoomKind::Seminar)
            .await
            .unwrap()
            .id();
        service
            .link(
                RelationKind::BuildingClassRooms,
                EntityRef::Building(building),
                EntityRef::ClassRoom(room),
            )
            .await
            .unwrap();
        (building, room)
    };

    let mut json: serde_json::Value =
        serde_json::from_str(&std::fs::read_to_string(&path).unwrap()).unwrap();
    json["buildings"][building.to_string()]["classRooms"] = serde_json::json!([]);
    std::fs::write(&path, serde_json::to_string_pretty(&json).unwrap()).unwrap();

    let opened = CampusService::open(Arc::new(JsonCampusRepository::new(&path))).await;
    match opened {
        Err(AppError::IntegrityError(message)) => {
            assert!(message.contains(&room.to_string()));
        }
        Err(other) => panic!("expected an integrity error, got {}", other),
        Ok(_) => panic!("expected an integrity error, got a service"),
    }
}

#[tokio::test]
async fn open_campus_uses_the_configured_file() {
    let dir = tempdir().unwrap();
    let config = AppConfig {
        data_file: dir.path().join("data").join("campus.json"),
        ..AppConfig::default()
    };

    let service = open_campus(&config).await.unwrap();
    service.create_building("A1", "Koszykowa 86").await.unwrap();

    assert!(config.data_file.exists());
}
