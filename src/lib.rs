//! Trait-object test doubles.
//!
//! Declare a contract with [`contract!`], build a [`Mock`] for it, configure
//! return values with [`Mock::setup`] and verify interactions afterwards with
//! [`Mock::call_count`] and friends.
//!
//! ```ignore
//! proxymock::contract! {
//!     pub trait Greeter {
//!         fn greet(&self, id: i32) -> String;
//!     }
//!     proxy GreeterProxy;
//!     calls GreeterCalls;
//! }
//!
//! let greeter = Mock::<dyn Greeter>::new()?;
//! greeter.setup(|g| g.greet(7))?.returns("hi".to_string());
//! assert_eq!(greeter.object().greet(7), "hi");
//! assert_eq!(greeter.object().greet(8), "");
//! assert_eq!(greeter.call_count(|g| g.greet(it::is_any()))?, 2);
//! ```

pub mod config;
pub mod contract;
pub mod expr;
pub mod history;
pub mod logging;
pub mod mock;
pub mod runtime;
use miette::Diagnostic;

pub use config::Config;
pub use contract::{
    introspect, Contract, ContractDescriptor, ContractShape, MemberDescriptor, MemberId,
    MemberKind, ParamDef,
};
pub use expr::matchers::{self as it, Arg};
pub use expr::{ArgExpr, ArgumentPredicate, CompiledCall, Expr, Quoted};
pub use history::{CallEntry, HistoryReport};
pub use mock::{Mock, SetupBuilder};
pub use runtime::session::{CallRecord, MockSession, Returned};
pub use runtime::synthesizer::{synthesize, ProxyFactory};
pub use runtime::value::{ArgValue, Args, Argument, Value};

/// Result type alias for the mocking library
pub type Result<T, E = MockError> = std::result::Result<T, E>;

/// Error types for the mocking library
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error, Diagnostic)]
pub enum MockError {
    #[error("Unsupported contract {contract}: {reason}")]
    #[diagnostic(
        code(proxymock::unsupported_contract),
        help("Contracts must be declared with `proxymock::contract!` or describe a pure interface: unique members, getters without parameters and setters taking exactly one value of the getter's type.")
    )]
    UnsupportedContract { contract: String, reason: String },

    #[error("Unsupported expression shape: {0}")]
    #[diagnostic(
        code(proxymock::unsupported_expression),
        help("Quote a single member call such as `|w| w.greet(7)` or a property read such as `|w| w.height()`, using the quoting surface generated for the contract.")
    )]
    UnsupportedExpressionShape(String),

    #[error("Property '{0}' is read-only")]
    #[diagnostic(
        code(proxymock::unwritable_property),
        help("Declare the property with a setter (`property name: Type => set_name;`) to verify writes to it.")
    )]
    UnwritableProperty(String),

    #[error("Index {index} is out of range: {count} matching call(s) recorded")]
    #[diagnostic(
        code(proxymock::index_out_of_range),
        help("Use `call_count` with the same expression to check how many calls matched.")
    )]
    IndexOutOfRange { index: usize, count: usize },

    #[error("Recorded value for {member} is a {actual}, not a {expected}")]
    #[diagnostic(
        code(proxymock::value_type),
        help("The contract adapter recorded a value whose type differs from the declared parameter type.")
    )]
    ValueType {
        member: String,
        expected: &'static str,
        actual: &'static str,
    },

    #[error("Configuration error: {0}")]
    #[diagnostic(
        code(proxymock::config_error),
        help("Check `.proxymock.toml`: `[dispatch] warn_unmatched` is a boolean, `[logging] level` a tracing level and `json` a boolean.")
    )]
    Config(String),

    #[error("History report error: {0}")]
    #[diagnostic(
        code(proxymock::report_error),
        help("Check that the report path exists and is writable, and that the file holds a report written by `HistoryReport::write_json`.")
    )]
    Report(String),
}
