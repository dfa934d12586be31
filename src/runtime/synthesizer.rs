//! Per-contract proxy factories.
//!
//! The forwarding code of a proxy is emitted by [`contract!`](crate::contract!)
//! at compile time; what remains per contract type is introspecting and
//! validating its description. [`synthesize`] does that once per contract
//! type and hands out the same [`ProxyFactory`] afterwards.

use crate::contract::{introspect, Contract, ContractShape};
use crate::logging;
use crate::runtime::session::MockSession;
use crate::{MockError, Result};
use std::any::{Any, TypeId};
use std::collections::HashMap;
use std::marker::PhantomData;
use std::sync::{Arc, Mutex, OnceLock, PoisonError};

type Cell = Arc<OnceLock<Result<Arc<dyn Any + Send + Sync>, MockError>>>;

fn cache() -> &'static Mutex<HashMap<TypeId, Cell>> {
    static CACHE: OnceLock<Mutex<HashMap<TypeId, Cell>>> = OnceLock::new();
    CACHE.get_or_init(|| Mutex::new(HashMap::new()))
}

/// Builds proxy instances of one contract type.
pub struct ProxyFactory<C: Contract + ?Sized> {
    contract: Arc<ContractShape>,
    _contract: PhantomData<fn() -> Box<C>>,
}

impl<C: Contract + ?Sized> ProxyFactory<C> {
    fn new(contract: ContractShape) -> Self {
        Self {
            contract: Arc::new(contract),
            _contract: PhantomData,
        }
    }

    pub fn contract(&self) -> &Arc<ContractShape> {
        &self.contract
    }

    /// Build one proxy instance bound to `session`.
    pub fn create(&self, session: Arc<MockSession>) -> C::Proxy {
        C::bind(session)
    }
}

impl<C: Contract + ?Sized> std::fmt::Debug for ProxyFactory<C> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ProxyFactory")
            .field("contract", &self.contract.name())
            .field("members", &self.contract.members().len())
            .finish()
    }
}

/// The factory for contract `C`, introspecting it on first use.
///
/// Concurrent first use from several threads still introspects exactly once;
/// a contract that fails introspection keeps failing with the same error.
pub fn synthesize<C: Contract + ?Sized>() -> Result<Arc<ProxyFactory<C>>> {
    let cell = {
        let mut cache = cache().lock().unwrap_or_else(PoisonError::into_inner);
        Arc::clone(cache.entry(TypeId::of::<C>()).or_default())
    };

    let entry = cell.get_or_init(|| {
        let shape = introspect::<C>()?;
        logging::log_proxy_synthesized(shape.name(), shape.members().len());
        let factory: Arc<dyn Any + Send + Sync> = Arc::new(ProxyFactory::<C>::new(shape));
        Ok(factory)
    });

    match entry {
        Ok(factory) => Arc::clone(factory)
            .downcast::<ProxyFactory<C>>()
            .map_err(|_| MockError::UnsupportedContract {
                contract: std::any::type_name::<C>().to_string(),
                reason: "factory cache holds another contract under this type".to_string(),
            }),
        Err(err) => Err(err.clone()),
    }
}
