//! Quoted call expressions and their compiled form.
//!
//! The quoting surface generated for a contract does not perform calls; it
//! returns a [`Quoted`] expression naming the member and carrying one
//! [`ArgExpr`] per argument. [`compiler::CallCompiler`] turns expressions into
//! [`CompiledCall`]s: a member identity plus one [`ArgumentPredicate`] per
//! parameter.

pub mod compiler;
pub mod matchers;

use crate::runtime::value::{Argument, Value};
use crate::MemberId;
use matchers::Arg;
use std::any::{type_name, TypeId};
use std::fmt;
use std::marker::PhantomData;
use std::sync::Arc;

pub use compiler::CallCompiler;

/// Type-erased custom predicate over one argument.
#[derive(Clone)]
pub struct Matcher {
    type_id: TypeId,
    type_name: &'static str,
    test: Arc<dyn Fn(&Value) -> bool + Send + Sync>,
}

impl Matcher {
    /// Wrap a typed predicate; values of any other type are rejected.
    pub fn new<T: 'static>(predicate: Arc<dyn Fn(&T) -> bool + Send + Sync>) -> Self {
        Self {
            type_id: TypeId::of::<T>(),
            type_name: type_name::<T>(),
            test: Arc::new(move |value: &Value| {
                value
                    .downcast_ref::<T>()
                    .map_or(false, |actual| predicate(actual))
            }),
        }
    }

    pub fn type_id(&self) -> TypeId {
        self.type_id
    }

    pub fn type_name(&self) -> &'static str {
        self.type_name
    }

    pub fn test(&self, value: &Value) -> bool {
        (self.test)(value)
    }
}

impl fmt::Debug for Matcher {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "is(<{}>)", self.type_name)
    }
}

/// One argument sub-expression of a quoted call.
#[derive(Clone, Debug)]
pub enum ArgExpr {
    Any,
    Predicate(Matcher),
    Value(Value),
}

impl<T: Argument> From<Arg<T>> for ArgExpr {
    fn from(arg: Arg<T>) -> Self {
        match arg {
            Arg::Any => ArgExpr::Any,
            Arg::Is(predicate) => ArgExpr::Predicate(Matcher::new(predicate)),
            Arg::Eq(value) => ArgExpr::Value(Value::new(value)),
        }
    }
}

/// An untyped quoted expression.
#[derive(Clone, Debug)]
pub enum Expr {
    /// `x.member(arg0, arg1, ...)`
    Call { member: MemberId, args: Vec<ArgExpr> },
    /// `x.property`
    Property {
        getter: MemberId,
        setter: Option<MemberId>,
    },
}

/// A quoted expression whose member returns `R`.
pub struct Quoted<R> {
    expr: Expr,
    _returns: PhantomData<fn() -> R>,
}

impl<R> Quoted<R> {
    pub fn call(member: MemberId, args: Vec<ArgExpr>) -> Self {
        Self::from_expr(Expr::Call { member, args })
    }

    pub fn property(getter: MemberId, setter: Option<MemberId>) -> Self {
        Self::from_expr(Expr::Property { getter, setter })
    }

    pub fn from_expr(expr: Expr) -> Self {
        Self {
            expr,
            _returns: PhantomData,
        }
    }

    pub fn expr(&self) -> &Expr {
        &self.expr
    }

    pub fn into_expr(self) -> Expr {
        self.expr
    }
}

impl<R> fmt::Debug for Quoted<R> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.expr.fmt(f)
    }
}

/// Compiled test for one argument position.
#[derive(Clone, Debug)]
pub enum ArgumentPredicate {
    Any,
    Equals(Value),
    Satisfies(Matcher),
}

impl ArgumentPredicate {
    pub fn accepts(&self, actual: &Value) -> bool {
        match self {
            ArgumentPredicate::Any => true,
            ArgumentPredicate::Equals(expected) => expected == actual,
            ArgumentPredicate::Satisfies(matcher) => matcher.test(actual),
        }
    }
}

/// A member identity with one predicate per parameter.
#[derive(Clone, Debug)]
pub struct CompiledCall {
    pub member: MemberId,
    pub predicates: Vec<ArgumentPredicate>,
}

impl CompiledCall {
    /// Whether a call of `member` with `args` satisfies every predicate.
    pub fn matches(&self, member: &MemberId, args: &[Value]) -> bool {
        self.member == *member && self.accepts(args)
    }

    pub fn accepts(&self, args: &[Value]) -> bool {
        self.predicates.len() == args.len()
            && self
                .predicates
                .iter()
                .zip(args)
                .all(|(predicate, actual)| predicate.accepts(actual))
    }
}
