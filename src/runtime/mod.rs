pub mod proxy;
pub mod session;
pub mod synthesizer;
pub mod value;

pub use session::{CallRecord, MockSession, Returned};
pub use synthesizer::{synthesize, ProxyFactory};
pub use value::{Args, Value};
