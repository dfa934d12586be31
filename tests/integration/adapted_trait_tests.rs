use crate::fixture::{inventory, worker, Inventory, InventoryProxy, Worker};
use proxymock::{introspect, it, MemberKind};
use std::any::TypeId;
use std::sync::Arc;

fn reserve_one(inventory: &dyn Inventory, sku: &str) -> bool {
    inventory.stock(sku) > 0 && inventory.reserve(sku, 1)
}

#[test]
fn test_borrowed_str_matches_owned_literals() {
    let mock = worker();
    mock.setup(|w| w.lookup("apple"))
        .unwrap()
        .returns(Some("red".to_string()));

    assert_eq!(mock.object().lookup("apple").as_deref(), Some("red"));
    assert_eq!(mock.object().lookup("pear"), None);

    assert_eq!(
        mock.call_count(|w| w.lookup(it::is(|key: &String| key.starts_with('p'))))
            .unwrap(),
        1
    );
    let params = mock.call_parameters(|w| w.lookup(it::is_any()), 1).unwrap();
    assert_eq!(params.get::<String>(0).map(String::as_str), Some("pear"));
}

#[test]
fn test_borrowed_slices_are_recorded_as_vectors() {
    let mock = worker();
    mock.setup(|w| w.write(it::is(|buf: &Vec<u8>| !buf.is_empty())))
        .unwrap()
        .returns_with(|args| args.get::<Vec<u8>>(0).map_or(0, Vec::len));

    assert_eq!(mock.object().write(b"abc"), 3);
    assert_eq!(mock.object().write(&[]), 0);
    assert_eq!(mock.call_count(|w| w.write(Vec::new())).unwrap(), 1);
    assert_eq!(mock.call_count(|w| w.write(b"abc".to_vec())).unwrap(), 1);
}

#[test]
fn test_borrowed_parameters_are_described_by_their_owned_type() {
    let shape = introspect::<dyn Worker>().unwrap();
    let param_type = |name: &str| {
        shape
            .members()
            .iter()
            .find(|m| m.id.name() == name && m.id.kind() == MemberKind::Method)
            .map(|m| m.params[0].type_id)
    };

    assert_eq!(param_type("lookup"), Some(TypeId::of::<String>()));
    assert_eq!(param_type("write"), Some(TypeId::of::<Vec<u8>>()));
}

#[test]
fn test_existing_trait_is_mocked_through_its_proxy() {
    let mock = inventory();
    mock.setup(|i| i.stock("apple")).unwrap().returns(4);
    mock.setup(|i| i.reserve(it::is_any(), it::is(|q: &u32| *q <= 4)))
        .unwrap()
        .returns(true);

    assert!(reserve_one(mock.object(), "apple"));
    assert!(!reserve_one(mock.object(), "kiwi"));

    assert_eq!(mock.call_count(|i| i.stock(it::is_any())).unwrap(), 2);
    assert_eq!(mock.call_count(|i| i.reserve("apple", 1)).unwrap(), 1);
    assert_eq!(mock.call_count(|i| i.reserve("kiwi", it::is_any())).unwrap(), 0);
}

#[test]
fn test_existing_trait_shared_handle_and_shape() {
    let mock = inventory();
    let shared: Arc<dyn Inventory> = mock.shared();
    shared.stock("plum");

    assert_eq!(mock.call_count(|i| i.stock("plum")).unwrap(), 1);
    assert!(format!("{:?}", mock.object()).contains("InventoryProxy"));

    let shape = introspect::<InventoryProxy>().unwrap();
    assert_eq!(shape.name(), "Inventory");
    assert_eq!(shape.members().len(), 2);
}

#[test]
fn test_existing_trait_mocks_are_independent() {
    let first = inventory();
    let second = inventory();
    first.setup(|i| i.stock(it::is_any())).unwrap().returns(9);

    assert_eq!(first.object().stock("a"), 9);
    assert_eq!(second.object().stock("a"), 0);
    assert_eq!(second.call_count(|i| i.stock(it::is_any())).unwrap(), 1);
}
