use std::fs;
use std::path::Path;

use chrono::NaiveDate;
use pretty_assertions::assert_eq;

use petlovers::load_snapshot;

#[test]
fn loads_demo_snapshot() {
    let path = Path::new(env!("CARGO_MANIFEST_DIR")).join("demos/petlovers.json");
    let s = load_snapshot(&path).unwrap();

    assert_eq!(s.clients.len(), 2);
    assert_eq!(s.consumptions.len(), 3);

    let by_quantity = s.rank_clients_by_quantity(10);
    assert_eq!(by_quantity[0].name, "Bruno Lima");
    assert_eq!(by_quantity[0].total, 6);

    let by_value = s.rank_clients_by_value(5);
    assert_eq!(by_value[0].name, "Ana Souza");
    assert!((by_value[0].value - 434.8).abs() < 1e-9);
}

#[test]
fn date_range_narrows_rankings() {
    let path = Path::new(env!("CARGO_MANIFEST_DIR")).join("demos/petlovers.json");
    let s = load_snapshot(&path).unwrap();

    let march = s.between(
        NaiveDate::from_ymd_opt(2024, 3, 1),
        NaiveDate::from_ymd_opt(2024, 3, 31),
    );
    let services = march.rank_services(5);

    let codes: Vec<_> = services.iter().map(|r| r.code.as_str()).collect();
    assert_eq!(codes, vec!["100001", "100002"]);
    assert!(march.rank_products(5).iter().all(|r| r.code.starts_with('1')));
}

#[test]
fn missing_file_reports_path() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("nope.json");

    let err = load_snapshot(&path).unwrap_err();
    assert!(format!("{err:#}").contains("nope.json"));
}

#[test]
fn invalid_snapshot_is_rejected_with_context() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("loja.json");
    fs::write(
        &path,
        r#"{"products": [{"codigo": "1", "nome": "Ração", "preco": 10}]}"#,
    )
    .unwrap();

    let err = format!("{:#}", load_snapshot(&path).unwrap_err());
    assert!(err.contains("Invalid snapshot"));
    assert!(err.contains("exactly 6 digits"));
}

#[test]
fn dangling_references_load_fine() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("loja.json");
    fs::write(
        &path,
        r#"{"consumos": [{"cpfCliente": "000", "idPet": 77,
            "itens": [{"codigo": "123456", "quantidade": 3}], "data": "2024-05-01"}]}"#,
    )
    .unwrap();

    let s = load_snapshot(&path).unwrap();
    assert!(s.rank_clients_by_quantity(10).is_empty());
    assert!(s.rank_services(5).is_empty());
    assert_eq!(s.rank_products(5)[0].total, 3);
    assert!(s.products_by_pet_type_and_breed().is_empty());
    assert!(s.client_history("000")[0].pet.is_none());
}
