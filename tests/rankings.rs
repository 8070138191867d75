use pretty_assertions::assert_eq;

use petlovers::types::{
    Client, ClientQuantityRow, ClientValueRow, ConsumptionItem, ConsumptionRecord, Pet, Product,
    Service, NOT_FOUND,
};
use petlovers::{
    breakdown_products_by_pet_type_and_breed, breakdown_services_by_pet_type_and_breed,
    rank_clients_by_quantity, rank_clients_by_value, rank_products, rank_services, Snapshot,
};

fn client(cpf: &str, name: &str) -> Client {
    Client {
        cpf: cpf.to_string(),
        name: name.to_string(),
        social_name: name.to_string(),
        issued_on: "2020-01-01".to_string(),
        rgs: vec![],
        phones: vec![],
        registered_on: "01/01/2024".to_string(),
    }
}

fn pet(id: u64, kind: &str, breed: &str, owner: &str) -> Pet {
    Pet {
        id,
        name: format!("pet {id}"),
        kind: kind.to_string(),
        gender: "M".to_string(),
        breed: breed.to_string(),
        owner_cpf: owner.to_string(),
    }
}

fn product(code: &str, name: &str, price: f64) -> Product {
    Product {
        code: code.to_string(),
        name: name.to_string(),
        price,
    }
}

fn service(code: &str, name: &str, price: f64) -> Service {
    Service {
        code: code.to_string(),
        name: name.to_string(),
        price,
        duration: 45.0,
    }
}

fn consumption(cpf: &str, pet_id: u64, items: &[(&str, u64)]) -> ConsumptionRecord {
    ConsumptionRecord {
        client_cpf: cpf.to_string(),
        pet_id,
        items: items
            .iter()
            .map(|(code, quantity)| ConsumptionItem {
                code: code.to_string(),
                quantity: *quantity,
            })
            .collect(),
        date: "2024-01-01".to_string(),
    }
}

/// A small store with a dangling client, a dangling pet and a code known
/// to neither catalog.
fn store() -> Snapshot {
    Snapshot {
        clients: vec![client("111", "Ana"), client("222", "Bruno"), client("333", "Carla")],
        pets: vec![
            pet(1, "Cachorro", "Poodle", "111"),
            pet(2, "Gato", "Persa", "222"),
            pet(3, "Cachorro", "Labrador", "333"),
        ],
        products: vec![product("000001", "Ração", 50.0), product("000002", "Coleira", 20.0)],
        services: vec![service("100001", "Banho", 40.0), service("100002", "Tosa", 60.0)],
        consumptions: vec![
            consumption("222", 2, &[("000001", 1), ("100001", 2)]),
            consumption("111", 1, &[("000002", 3)]),
            consumption("999", 3, &[("000001", 4)]),
            consumption("333", 42, &[("100002", 1), ("555555", 6)]),
            consumption("111", 1, &[("100001", 1)]),
        ],
    }
}

#[test]
fn single_client_example() {
    let clients = vec![client("111", "Ana")];
    let products = vec![product("000001", "Ração", 50.0)];
    let consumptions = vec![consumption("111", 1, &[("000001", 2)])];

    assert_eq!(
        rank_clients_by_quantity(&clients, &consumptions, 10),
        vec![ClientQuantityRow {
            cpf: "111".to_string(),
            name: "Ana".to_string(),
            total: 2,
        }]
    );
    assert_eq!(
        rank_clients_by_value(&clients, &consumptions, &products, &[], 5),
        vec![ClientValueRow {
            cpf: "111".to_string(),
            name: "Ana".to_string(),
            value: 100.0,
        }]
    );
}

#[test]
fn unknown_client_is_filtered_but_still_counts_for_products() {
    let s = store();

    let clients = s.rank_clients_by_quantity(usize::MAX);
    assert!(clients.iter().all(|r| r.cpf != "999"));

    let products = s.rank_products(usize::MAX);
    let racao = products.iter().find(|r| r.code == "000001").unwrap();
    assert_eq!(racao.total, 5);
}

#[test]
fn quantity_sum_matches_resolvable_clients() {
    let s = store();
    let known = ["111", "222", "333"];

    let expected: u64 = s
        .consumptions
        .iter()
        .filter(|c| known.contains(&c.client_cpf.as_str()))
        .map(|c| c.total_quantity())
        .sum();
    let ranked: u64 = s
        .rank_clients_by_quantity(usize::MAX)
        .iter()
        .map(|r| r.total)
        .sum();

    assert_eq!(ranked, expected);
}

#[test]
fn client_ranking_is_sorted_unique_and_limited() {
    let s = store();
    let rows = s.rank_clients_by_quantity(2);

    assert!(rows.len() <= 2);
    assert!(rows.windows(2).all(|w| w[0].total >= w[1].total));

    let all = s.rank_clients_by_quantity(usize::MAX);
    let mut cpfs: Vec<_> = all.iter().map(|r| r.cpf.as_str()).collect();
    cpfs.sort();
    cpfs.dedup();
    assert_eq!(cpfs.len(), all.len());
}

#[test]
fn equal_totals_follow_first_appearance_in_log() {
    let clients = vec![client("100", "Zé"), client("050", "Alice"), client("075", "Maria")];
    let consumptions = vec![
        consumption("075", 1, &[("000001", 2)]),
        consumption("100", 1, &[("000001", 2)]),
        consumption("050", 1, &[("000001", 1), ("000002", 1)]),
    ];

    let order: Vec<_> = rank_clients_by_quantity(&clients, &consumptions, 10)
        .into_iter()
        .map(|r| r.cpf)
        .collect();

    assert_eq!(order, vec!["075", "100", "050"]);
}

#[test]
fn value_ranking_prices_products_and_services() {
    let s = store();
    let rows = s.rank_clients_by_value(5);

    let values: Vec<(&str, f64)> = rows.iter().map(|r| (r.cpf.as_str(), r.value)).collect();
    // Bruno: 50 + 2*40, Ana: 3*20 + 40, Carla: 60 + unknown code worth 0
    assert_eq!(values, vec![("222", 130.0), ("111", 100.0), ("333", 60.0)]);
}

#[test]
fn product_price_takes_precedence_in_value_ranking() {
    let clients = vec![client("111", "Ana")];
    let products = vec![product("000001", "Ração", 50.0)];
    let services = vec![service("000001", "Consulta", 200.0)];
    let consumptions = vec![consumption("111", 1, &[("000001", 1)])];

    let rows = rank_clients_by_value(&clients, &consumptions, &products, &services, 5);
    assert_eq!(rows[0].value, 50.0);
}

#[test]
fn product_ranking_keeps_unresolved_codes() {
    let s = store();
    let rows = rank_products(&s.products, &s.consumptions, usize::MAX);

    let unknown = rows.iter().find(|r| r.code == "555555").unwrap();
    assert_eq!(unknown.name, NOT_FOUND);
    assert_eq!(unknown.total, 6);
    // Service codes are ranked too, as not found
    assert!(rows.iter().any(|r| r.code == "100001" && r.name == NOT_FOUND));
    assert_eq!(rows[0].code, "555555");
}

#[test]
fn service_ranking_drops_unresolved_codes_before_limit() {
    let s = store();
    let rows = rank_services(&s.services, &s.consumptions, 2);

    let codes: Vec<_> = rows.iter().map(|r| r.code.as_str()).collect();
    assert_eq!(codes, vec!["100001", "100002"]);
    assert!(rows.iter().all(|r| r.name != NOT_FOUND));
    assert_eq!(rows[0].total, 3);
}

#[test]
fn breakdown_skips_consumptions_of_unknown_pets() {
    let s = store();
    let b = breakdown_products_by_pet_type_and_breed(&s.products, &s.consumptions, &s.pets);

    // Pet 42 is unknown: its whole consumption is ignored
    assert!(b.get("Cachorro", "Labrador").is_some());
    let labrador = b.get("Cachorro", "Labrador").unwrap();
    assert_eq!(labrador.len(), 1);
    assert_eq!(labrador[0].code, "000001");
    assert!(b
        .kinds
        .iter()
        .flat_map(|k| &k.breeds)
        .flat_map(|br| &br.rows)
        .all(|r| r.code != "555555"));

    let poodle = b.get("Cachorro", "Poodle").unwrap();
    let names: Vec<_> = poodle.iter().map(|r| (r.name.as_str(), r.total)).collect();
    assert_eq!(names, vec![("Coleira", 3), (NOT_FOUND, 1)]);
}

#[test]
fn service_breakdown_names_from_service_catalog() {
    let s = store();
    let b = breakdown_services_by_pet_type_and_breed(&s.services, &s.consumptions, &s.pets);

    let persa = b.get("Gato", "Persa").unwrap();
    let names: Vec<_> = persa.iter().map(|r| (r.name.as_str(), r.total)).collect();
    assert_eq!(names, vec![("Banho", 2), (NOT_FOUND, 1)]);
}

#[test]
fn oversized_quantities_rank_at_the_ceiling() {
    let s = Snapshot::from_json_str(
        r#"{"clients": [{"cpf": "111", "nome": "Ana", "nomeSocial": "Ana",
                "dataEmissao": "2020-01-01", "rgs": [], "telefones": [],
                "dataCadastro": "01/01/2024"}],
            "consumos": [
                {"cpfCliente": "111", "idPet": 1, "data": "2024-01-01",
                 "itens": [{"codigo": "000001", "quantidade": 18446744073709551615}]},
                {"cpfCliente": "111", "idPet": 1, "data": "2024-01-02",
                 "itens": [{"codigo": "000001", "quantidade": 1}]}
            ]}"#,
    )
    .unwrap();

    let rows = s.rank_clients_by_quantity(10);
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0].total, u64::MAX);
    assert_eq!(s.rank_products(5)[0].total, u64::MAX);
}

#[test]
fn empty_inputs_give_empty_results() {
    let s = Snapshot::default();

    assert!(s.rank_clients_by_quantity(10).is_empty());
    assert!(s.rank_clients_by_value(5).is_empty());
    assert!(s.rank_products(5).is_empty());
    assert!(s.rank_services(5).is_empty());
    assert!(s.products_by_pet_type_and_breed().is_empty());
    assert!(s.services_by_pet_type_and_breed().is_empty());
}

#[test]
fn queries_are_idempotent() {
    let s = store();

    let first = serde_json::to_string(&(
        s.rank_clients_by_quantity(10),
        s.rank_clients_by_value(5),
        s.rank_products(5),
        s.rank_services(5),
        s.products_by_pet_type_and_breed(),
        s.services_by_pet_type_and_breed(),
    ))
    .unwrap();
    let second = serde_json::to_string(&(
        s.rank_clients_by_quantity(10),
        s.rank_clients_by_value(5),
        s.rank_products(5),
        s.rank_services(5),
        s.products_by_pet_type_and_breed(),
        s.services_by_pet_type_and_breed(),
    ))
    .unwrap();

    assert_eq!(first, second);
    assert_eq!(s, store());
}
