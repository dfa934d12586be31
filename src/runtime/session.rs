use crate::config::DispatchConfig;
use crate::contract::{ContractShape, MemberId};
use crate::expr::CompiledCall;
use crate::logging;
use crate::runtime::value::{Args, Value};
use crate::{MockError, Result};
use std::any::Any;
use std::collections::HashMap;
use std::fmt;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

/// Produces the value a matched setup returns.
pub type Producer = Arc<dyn Fn(&Args) -> Box<dyn Any + Send> + Send + Sync>;

/// Box a typed producer function into a [`Producer`].
pub fn producer<R, F>(produce: F) -> Producer
where
    F: Fn(&Args) -> R + Send + Sync + 'static,
    R: Send + 'static,
{
    Arc::new(move |args: &Args| Box::new(produce(args)) as Box<dyn Any + Send>)
}

/// One intercepted invocation.
#[derive(Clone, Debug)]
pub struct CallRecord {
    pub sequence: u64,
    pub member: MemberId,
    pub args: Args,
}

/// A configured return rule for one member.
pub struct Setup {
    pub call: CompiledCall,
    producer: Producer,
}

impl Setup {
    pub fn new(call: CompiledCall, producer: Producer) -> Self {
        Self { call, producer }
    }
}

impl fmt::Debug for Setup {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Setup")
            .field("member", &self.call.member)
            .field("predicates", &self.call.predicates)
            .finish_non_exhaustive()
    }
}

/// Tagged return channel between a session and its proxy.
pub enum Returned {
    Value(Box<dyn Any + Send>),
    /// No setup matched; the proxy substitutes the neutral value.
    Neutral,
}

impl fmt::Debug for Returned {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Returned::Value(_) => f.write_str("Value(..)"),
            Returned::Neutral => f.write_str("Neutral"),
        }
    }
}

#[derive(Default)]
struct SessionState {
    history: Vec<CallRecord>,
    setups: HashMap<MemberId, Vec<Arc<Setup>>>,
}

/// Call history and setup table of one proxy instance.
pub struct MockSession {
    contract: Arc<ContractShape>,
    config: DispatchConfig,
    state: Mutex<SessionState>,
}

impl MockSession {
    pub fn new(contract: Arc<ContractShape>) -> Self {
        Self::with_config(contract, DispatchConfig::default())
    }

    pub fn with_config(contract: Arc<ContractShape>, config: DispatchConfig) -> Self {
        Self {
            contract,
            config,
            state: Mutex::new(SessionState::default()),
        }
    }

    pub fn contract(&self) -> &ContractShape {
        &self.contract
    }

    // History and setups are append-only, so a panic while the lock was held
    // cannot leave them half-updated.
    fn state(&self) -> MutexGuard<'_, SessionState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// The single entry point every forwarded proxy call passes through.
    ///
    /// Records the call first, then returns the value of the first setup
    /// registered for `member` whose predicates accept `args`.
    pub fn dispatch(&self, member: MemberId, args: Vec<Value>) -> Returned {
        let args = Args::new(args);
        let candidates = {
            let mut state = self.state();
            let sequence = state.history.len() as u64;
            state.history.push(CallRecord {
                sequence,
                member,
                args: args.clone(),
            });
            state.setups.get(&member).cloned().unwrap_or_default()
        };

        // Predicates and producers run unlocked so they may call back into
        // the mock.
        match candidates
            .iter()
            .position(|setup| setup.call.accepts(args.as_slice()))
        {
            Some(position) => {
                logging::log_dispatch(&member, &args, Some(position));
                Returned::Value((candidates[position].producer)(&args))
            }
            None => {
                logging::log_dispatch(&member, &args, None);
                logging::log_unmatched_call(&member, candidates.len(), self.config.warn_unmatched);
                if self.contract.member(&member).is_none() {
                    tracing::warn!(
                        contract = self.contract.name(),
                        member = %member,
                        "Dispatched a member the contract does not describe"
                    );
                }
                Returned::Neutral
            }
        }
    }

    /// Append a setup; earlier setups for the same member keep precedence.
    pub fn add_setup(&self, call: CompiledCall, producer: Producer) {
        logging::log_setup_registered(&call.member, call.predicates.len());
        let member = call.member;
        self.state()
            .setups
            .entry(member)
            .or_default()
            .push(Arc::new(Setup::new(call, producer)));
    }

    pub fn setup_count(&self, member: &MemberId) -> usize {
        self.state().setups.get(member).map_or(0, Vec::len)
    }

    /// Number of recorded calls matching `call`.
    pub fn call_count(&self, call: &CompiledCall) -> usize {
        self.matching(call).len()
    }

    /// Arguments of the `index`-th recorded call matching `call`.
    pub fn call_parameters(&self, call: &CompiledCall, index: usize) -> Result<Args> {
        let mut matching = self.matching(call);
        let count = matching.len();
        if index < count {
            Ok(matching.swap_remove(index).args)
        } else {
            Err(MockError::IndexOutOfRange { index, count })
        }
    }

    // Predicates run on a snapshot so they may call back into the mock.
    fn matching(&self, call: &CompiledCall) -> Vec<CallRecord> {
        let history = self.history();
        history
            .into_iter()
            .filter(|record| call.matches(&record.member, record.args.as_slice()))
            .collect()
    }

    /// Snapshot of every recorded call, in invocation order.
    pub fn history(&self) -> Vec<CallRecord> {
        self.state().history.clone()
    }
}

impl fmt::Debug for MockSession {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let state = self.state();
        f.debug_struct("MockSession")
            .field("contract", &self.contract.name())
            .field("calls", &state.history.len())
            .field("setups", &state.setups.values().map(Vec::len).sum::<usize>())
            .finish()
    }
}
