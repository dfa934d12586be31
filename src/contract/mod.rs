//! Contract descriptions and introspection.
//!
//! A contract is a trait used as a trait object (`dyn Trait`). The
//! [`contract!`](crate::contract!) macro implements [`Contract`] for it, or
//! for a generated proxy when adapting an existing trait, describing every
//! invocable member; [`introspect`] validates that
//! description into a [`ContractShape`] the compiler and sessions work with.

mod macros;

use crate::runtime::session::MockSession;
use crate::{MockError, Result};
use serde::{Deserialize, Serialize};
use std::any::{type_name, TypeId};
use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

/// Accessor kind of a contract member.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MemberKind {
    Method,
    Getter,
    Setter,
}

/// Stable identity of a contract member.
///
/// Derived from the accessor kind, the member name and the stringified
/// parameter types. Proxies and quoting surfaces build it through the same
/// macro helper, so a quoted call and a runtime invocation of the same member
/// always produce equal identities.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub struct MemberId {
    kind: MemberKind,
    name: &'static str,
    signature: &'static str,
}

impl MemberId {
    pub const fn method(name: &'static str, signature: &'static str) -> Self {
        Self {
            kind: MemberKind::Method,
            name,
            signature,
        }
    }

    pub const fn getter(property: &'static str, ty: &'static str) -> Self {
        Self {
            kind: MemberKind::Getter,
            name: property,
            signature: ty,
        }
    }

    pub const fn setter(property: &'static str, ty: &'static str) -> Self {
        Self {
            kind: MemberKind::Setter,
            name: property,
            signature: ty,
        }
    }

    pub fn kind(&self) -> MemberKind {
        self.kind
    }

    pub fn name(&self) -> &'static str {
        self.name
    }

    pub fn signature(&self) -> &'static str {
        self.signature
    }
}

impl fmt::Display for MemberId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.kind {
            MemberKind::Method => write!(f, "{}({})", self.name, self.signature),
            MemberKind::Getter => write!(f, "get {}: {}", self.name, self.signature),
            MemberKind::Setter => write!(f, "set {}: {}", self.name, self.signature),
        }
    }
}

/// Parameter descriptor.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParamDef {
    pub name: &'static str,
    pub ty: &'static str,
    pub type_id: TypeId,
}

impl ParamDef {
    pub fn of<T: 'static>(name: &'static str) -> Self {
        Self {
            name,
            ty: type_name::<T>(),
            type_id: TypeId::of::<T>(),
        }
    }
}

/// Descriptor for a single invocable member.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MemberDescriptor {
    pub id: MemberId,
    pub params: Vec<ParamDef>,
    /// Declared return type; `None` for members returning no value.
    pub returns: Option<&'static str>,
}

impl MemberDescriptor {
    pub fn method(id: MemberId, params: Vec<ParamDef>, returns: Option<&'static str>) -> Self {
        Self {
            id,
            params,
            returns,
        }
    }

    pub fn getter<T: 'static>(id: MemberId) -> Self {
        Self {
            id,
            params: Vec::new(),
            returns: Some(type_name::<T>()),
        }
    }

    pub fn setter<T: 'static>(id: MemberId) -> Self {
        Self {
            id,
            params: vec![ParamDef::of::<T>("value")],
            returns: None,
        }
    }
}

/// Raw description of a contract, as emitted by its adapter.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContractDescriptor {
    pub name: &'static str,
    pub members: Vec<MemberDescriptor>,
}

impl ContractDescriptor {
    pub fn new(name: &'static str) -> Self {
        Self {
            name,
            members: Vec::new(),
        }
    }

    pub fn member(mut self, member: MemberDescriptor) -> Self {
        self.members.push(member);
        self
    }
}

/// A mockable contract.
///
/// Implemented by [`contract!`](crate::contract!): for `dyn Trait` when the
/// macro declares the trait, for the generated proxy when it adapts an
/// existing one.
pub trait Contract: 'static {
    /// The trait object handed to code under test.
    type Object: ?Sized + 'static;
    /// Generated type implementing the contract by forwarding every member to
    /// its session.
    type Proxy: Send + Sync + 'static;
    /// Generated quoting surface whose methods mirror the contract and return
    /// inspectable expressions instead of performing calls.
    type Calls;

    fn describe() -> ContractDescriptor;

    /// Bind a new proxy instance to `session`.
    fn bind(session: Arc<MockSession>) -> Self::Proxy;

    fn calls() -> Self::Calls;

    fn upcast(proxy: &Self::Proxy) -> &Self::Object;

    fn upcast_arc(proxy: Arc<Self::Proxy>) -> Arc<Self::Object>;
}

/// Property accessors of a contract.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PropertyDef {
    pub getter: MemberId,
    pub setter: Option<MemberId>,
}

/// A validated contract: members indexed by identity.
#[derive(Debug, Clone)]
pub struct ContractShape {
    name: &'static str,
    type_id: Option<TypeId>,
    members: Vec<MemberDescriptor>,
    index: HashMap<MemberId, usize>,
    properties: HashMap<&'static str, PropertyDef>,
}

/// Introspect the contract `C`.
pub fn introspect<C: Contract + ?Sized>() -> Result<ContractShape> {
    let mut shape = ContractShape::from_descriptor(C::describe())?;
    shape.type_id = Some(TypeId::of::<C>());
    Ok(shape)
}

impl ContractShape {
    /// Validate a raw descriptor.
    pub fn from_descriptor(descriptor: ContractDescriptor) -> Result<Self> {
        let contract = descriptor.name;
        let unsupported = |reason: String| MockError::UnsupportedContract {
            contract: contract.to_string(),
            reason,
        };

        let mut index = HashMap::with_capacity(descriptor.members.len());
        for (position, member) in descriptor.members.iter().enumerate() {
            if index.insert(member.id, position).is_some() {
                return Err(unsupported(format!("member {} is declared twice", member.id)));
            }
            match member.id.kind() {
                MemberKind::Getter if !member.params.is_empty() => {
                    return Err(unsupported(format!(
                        "getter {} must not take parameters",
                        member.id
                    )));
                }
                MemberKind::Setter if member.params.len() != 1 => {
                    return Err(unsupported(format!(
                        "setter {} must take exactly one value, found {}",
                        member.id,
                        member.params.len()
                    )));
                }
                _ => {}
            }
        }

        let mut properties = HashMap::new();
        for member in descriptor
            .members
            .iter()
            .filter(|m| m.id.kind() == MemberKind::Getter)
        {
            let previous = properties.insert(
                member.id.name(),
                PropertyDef {
                    getter: member.id,
                    setter: None,
                },
            );
            if previous.is_some() {
                return Err(unsupported(format!(
                    "property {} is declared twice",
                    member.id.name()
                )));
            }
        }
        for member in descriptor
            .members
            .iter()
            .filter(|m| m.id.kind() == MemberKind::Setter)
        {
            let getter_position = properties
                .get(member.id.name())
                .and_then(|property| index.get(&property.getter).copied())
                .ok_or_else(|| {
                    unsupported(format!("setter {} has no matching getter", member.id))
                })?;
            let getter = &descriptor.members[getter_position];
            if getter.returns != Some(member.params[0].ty) {
                return Err(unsupported(format!(
                    "setter {} takes a {} but the getter returns {}",
                    member.id,
                    member.params[0].ty,
                    getter.returns.unwrap_or("()")
                )));
            }
            if let Some(property) = properties.get_mut(member.id.name()) {
                property.setter = Some(member.id);
            }
        }

        Ok(Self {
            name: contract,
            type_id: None,
            members: descriptor.members,
            index,
            properties,
        })
    }

    pub fn name(&self) -> &'static str {
        self.name
    }

    /// `TypeId` of the contract type, when introspected from one.
    pub fn type_id(&self) -> Option<TypeId> {
        self.type_id
    }

    pub fn members(&self) -> &[MemberDescriptor] {
        &self.members
    }

    pub fn member(&self, id: &MemberId) -> Option<&MemberDescriptor> {
        self.index.get(id).map(|&position| &self.members[position])
    }

    pub fn property(&self, name: &str) -> Option<&PropertyDef> {
        self.properties.get(name)
    }
}
