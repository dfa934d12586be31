//! Glue called by generated proxies.

use crate::contract::MemberId;
use crate::runtime::session::{MockSession, Returned};
use crate::runtime::value::Value;

/// Forward one proxy invocation to `session` and convert the result back to
/// the member's declared return type.
///
/// Members returning `()` discard the result. A produced value of the wrong
/// type degrades to the neutral value instead of panicking inside the code
/// under test.
pub fn forward<R>(session: &MockSession, member: MemberId, args: Vec<Value>) -> R
where
    R: Default + 'static,
{
    session.dispatch(member, args).into_typed::<R>(&member)
}

impl Returned {
    /// Convert into `R`, substituting `R::default()` for the neutral value.
    pub fn into_typed<R: Default + 'static>(self, member: &MemberId) -> R {
        match self {
            Returned::Value(value) => match value.downcast::<R>() {
                Ok(value) => *value,
                Err(_) => {
                    tracing::warn!(
                        member = %member,
                        expected = std::any::type_name::<R>(),
                        "Setup produced a value of another type; returning the neutral value"
                    );
                    R::default()
                }
            },
            Returned::Neutral => R::default(),
        }
    }
}
