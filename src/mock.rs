//! The [`Mock`] facade: one proxy instance plus its session.

use crate::config::{Config, DispatchConfig};
use crate::contract::Contract;
use crate::expr::matchers::Arg;
use crate::expr::{ArgExpr, CallCompiler, CompiledCall, Quoted};
use crate::history::HistoryReport;
use crate::runtime::session::{producer, CallRecord, MockSession};
use crate::runtime::synthesizer::{synthesize, ProxyFactory};
use crate::runtime::value::{Args, Argument};
use crate::{MockError, Result};
use std::fmt;
use std::marker::PhantomData;
use std::sync::Arc;

/// A test double for the contract `C`.
///
/// `C` is the trait object type, e.g. `Mock<dyn Worker>`, or the generated
/// proxy of an adapted trait, e.g. `Mock<StoreProxy>`. Expressions passed
/// to [`setup`](Mock::setup) and the verification queries are closures over
/// the contract's generated quoting surface.
pub struct Mock<C: Contract + ?Sized> {
    factory: Arc<ProxyFactory<C>>,
    session: Arc<MockSession>,
    proxy: Arc<C::Proxy>,
}

impl<C: Contract + ?Sized> Mock<C> {
    /// Create a mock using the process-wide configuration.
    pub fn new() -> Result<Self> {
        Self::with_dispatch(Config::global().dispatch)
    }

    pub fn with_config(config: &Config) -> Result<Self> {
        Self::with_dispatch(config.dispatch)
    }

    fn with_dispatch(dispatch: DispatchConfig) -> Result<Self> {
        let factory = synthesize::<C>()?;
        let session = Arc::new(MockSession::with_config(
            Arc::clone(factory.contract()),
            dispatch,
        ));
        let proxy = Arc::new(factory.create(Arc::clone(&session)));
        Ok(Self {
            factory,
            session,
            proxy,
        })
    }

    /// The proxy instance, to be handed to the code under test.
    pub fn object(&self) -> &C::Object {
        C::upcast(&self.proxy)
    }

    /// A shared handle to the same proxy instance.
    pub fn shared(&self) -> Arc<C::Object> {
        C::upcast_arc(Arc::clone(&self.proxy))
    }

    pub fn session(&self) -> &Arc<MockSession> {
        &self.session
    }

    pub fn factory(&self) -> &Arc<ProxyFactory<C>> {
        &self.factory
    }

    fn quote<R, F>(&self, expr: F) -> Quoted<R>
    where
        F: FnOnce(&C::Calls) -> Quoted<R>,
    {
        expr(&C::calls())
    }

    fn compile<R, F>(&self, expr: F) -> Result<CompiledCall>
    where
        F: FnOnce(&C::Calls) -> Quoted<R>,
    {
        CallCompiler::new(self.session.contract()).compile(self.quote(expr).into_expr())
    }

    fn compile_write<R, F>(&self, property: F, value: Arg<R>) -> Result<CompiledCall>
    where
        R: Argument,
        F: FnOnce(&C::Calls) -> Quoted<R>,
    {
        CallCompiler::new(self.session.contract())
            .compile_write(self.quote(property).into_expr(), ArgExpr::from(value))
    }

    /// Start configuring what calls matching `expr` return.
    ///
    /// Setups are tried in registration order; the first one whose
    /// predicates accept a call answers it.
    pub fn setup<R, F>(&self, expr: F) -> Result<SetupBuilder<'_, C, R>>
    where
        F: FnOnce(&C::Calls) -> Quoted<R>,
    {
        Ok(SetupBuilder {
            mock: self,
            call: self.compile(expr)?,
            _returns: PhantomData,
        })
    }

    /// Number of recorded calls matching `expr`.
    pub fn call_count<R, F>(&self, expr: F) -> Result<usize>
    where
        F: FnOnce(&C::Calls) -> Quoted<R>,
    {
        Ok(self.session.call_count(&self.compile(expr)?))
    }

    /// Arguments of the `index`-th recorded call matching `expr`, counting
    /// from zero in recording order.
    pub fn call_parameters<R, F>(&self, expr: F, index: usize) -> Result<Args>
    where
        F: FnOnce(&C::Calls) -> Quoted<R>,
    {
        self.session.call_parameters(&self.compile(expr)?, index)
    }

    /// Number of recorded writes to `property` whose value matches `value`.
    pub fn set_call_count<R, F>(&self, property: F, value: impl Into<Arg<R>>) -> Result<usize>
    where
        R: Argument,
        F: FnOnce(&C::Calls) -> Quoted<R>,
    {
        let call = self.compile_write(property, value.into())?;
        Ok(self.session.call_count(&call))
    }

    /// The value of the `index`-th recorded write to `property` matching
    /// `value`.
    pub fn set_call_parameters<R, F>(
        &self,
        property: F,
        value: impl Into<Arg<R>>,
        index: usize,
    ) -> Result<R>
    where
        R: Argument,
        F: FnOnce(&C::Calls) -> Quoted<R>,
    {
        let call = self.compile_write(property, value.into())?;
        let args = self.session.call_parameters(&call, index)?;
        let written = args.value(0).ok_or(MockError::IndexOutOfRange {
            index: 0,
            count: args.len(),
        })?;
        written
            .downcast_ref::<R>()
            .cloned()
            .ok_or_else(|| MockError::ValueType {
                member: call.member.to_string(),
                expected: std::any::type_name::<R>(),
                actual: written.type_name(),
            })
    }

    /// Snapshot of every call the proxy received.
    pub fn history(&self) -> Vec<CallRecord> {
        self.session.history()
    }

    pub fn report(&self) -> HistoryReport {
        HistoryReport::from_session(&self.session)
    }
}

impl<C: Contract + ?Sized> fmt::Debug for Mock<C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Mock")
            .field("contract", &self.session.contract().name())
            .field("session", &self.session)
            .finish_non_exhaustive()
    }
}

/// Pending setup returned by [`Mock::setup`].
#[must_use = "a setup is only registered once `returns` or `returns_with` is called"]
pub struct SetupBuilder<'m, C: Contract + ?Sized, R> {
    mock: &'m Mock<C>,
    call: CompiledCall,
    _returns: PhantomData<fn() -> R>,
}

impl<'m, C: Contract + ?Sized, R: Send + 'static> SetupBuilder<'m, C, R> {
    /// Answer matching calls with a clone of `value`.
    pub fn returns(self, value: R) -> &'m Mock<C>
    where
        R: Clone + Sync,
    {
        self.register(move |_: &Args| value.clone())
    }

    /// Answer matching calls with a value computed from their arguments.
    pub fn returns_with<F>(self, produce: F) -> &'m Mock<C>
    where
        F: Fn(&Args) -> R + Send + Sync + 'static,
    {
        self.register(produce)
    }

    fn register<F>(self, produce: F) -> &'m Mock<C>
    where
        F: Fn(&Args) -> R + Send + Sync + 'static,
    {
        self.mock.session.add_setup(self.call, producer(produce));
        self.mock
    }
}

impl<C: Contract + ?Sized, R> fmt::Debug for SetupBuilder<'_, C, R> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SetupBuilder")
            .field("call", &self.call)
            .finish_non_exhaustive()
    }
}
