use proxymock::{Config, Mock};

proxymock::contract! {
    /// Collaborator used throughout the integration tests.
    pub trait Worker: Send + Sync {
        fn do_something(&self, a: i32, b: String, c: bool) -> i32;
        fn do_something_stringy(&self, a: i32) -> String;
        fn find(&self, key: String) -> Option<String>;
        fn lookup(&self, key: &str) -> Option<String>;
        fn write(&self, buf: &[u8]) -> usize;
        fn is_ready(&self) -> bool;
        fn ratio(&self) -> f64;
        fn notify(&self, message: String);
        property height: i32 => set_height;
        property label: String;
    }
    proxy WorkerProxy;
    calls WorkerCalls;
}

proxymock::contract! {
    pub trait Greeter {
        fn greet(&self, id: i32) -> String;
    }
    proxy GreeterProxy;
    calls GreeterCalls;
}

proxymock::contract! {
    pub trait Calculator {
        fn add(&self, a: i32, b: String, c: bool) -> i32;
    }
    proxy CalculatorProxy;
    calls CalculatorCalls;
}

/// A trait declared without `contract!`, as a crate under test would.
pub trait Inventory: std::fmt::Debug + Send + Sync {
    fn stock(&self, sku: &str) -> u32;
    fn reserve(&self, sku: &str, quantity: u32) -> bool;
}

proxymock::contract! {
    pub proxy InventoryProxy for Inventory {
        fn stock(&self, sku: &str) -> u32;
        fn reserve(&self, sku: &str, quantity: u32) -> bool;
    }
    calls InventoryCalls;
}

pub fn worker() -> Mock<dyn Worker> {
    Mock::with_config(&Config::default()).expect("Worker is a valid contract")
}

pub fn greeter() -> Mock<dyn Greeter> {
    Mock::with_config(&Config::default()).expect("Greeter is a valid contract")
}

pub fn calculator() -> Mock<dyn Calculator> {
    Mock::with_config(&Config::default()).expect("Calculator is a valid contract")
}

pub fn inventory() -> Mock<InventoryProxy> {
    Mock::with_config(&Config::default()).expect("Inventory is a valid contract")
}
