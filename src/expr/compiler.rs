use super::{ArgExpr, ArgumentPredicate, CompiledCall, Expr};
use crate::contract::{ContractShape, MemberId, MemberKind, ParamDef};
use crate::{MockError, Result};
use std::any::TypeId;

/// Compiles quoted expressions against one contract.
pub struct CallCompiler<'c> {
    contract: &'c ContractShape,
}

impl<'c> CallCompiler<'c> {
    pub fn new(contract: &'c ContractShape) -> Self {
        Self { contract }
    }

    /// Compile a call-shaped or property-read-shaped expression.
    ///
    /// A property read compiles to its getter with no predicates, so every
    /// read matches.
    pub fn compile(&self, expr: Expr) -> Result<CompiledCall> {
        match expr {
            Expr::Call { member, args } => {
                if member.kind() != MemberKind::Method {
                    return Err(MockError::UnsupportedExpressionShape(format!(
                        "{} is an accessor; quote it as a property instead of a call",
                        member
                    )));
                }
                let descriptor = self.contract.member(&member).ok_or_else(|| {
                    MockError::UnsupportedExpressionShape(format!(
                        "{} is not a member of {}",
                        member,
                        self.contract.name()
                    ))
                })?;
                if descriptor.params.len() != args.len() {
                    return Err(MockError::UnsupportedExpressionShape(format!(
                        "{} takes {} argument(s) but the expression passes {}",
                        member,
                        descriptor.params.len(),
                        args.len()
                    )));
                }
                let predicates = descriptor
                    .params
                    .iter()
                    .zip(args)
                    .map(|(param, arg)| compile_argument(param, arg))
                    .collect::<Result<Vec<_>>>()?;
                Ok(CompiledCall { member, predicates })
            }
            Expr::Property { getter, .. } => {
                self.property_getter(getter)?;
                Ok(CompiledCall {
                    member: getter,
                    predicates: Vec::new(),
                })
            }
        }
    }

    /// Compile a property write: the property's setter with one predicate for
    /// the written value.
    pub fn compile_write(&self, property: Expr, value: ArgExpr) -> Result<CompiledCall> {
        let getter = match property {
            Expr::Property { getter, .. } => getter,
            Expr::Call { member, .. } => {
                return Err(MockError::UnsupportedExpressionShape(format!(
                    "{} is a method call; property writes need a property expression",
                    member
                )))
            }
        };
        self.property_getter(getter)?;
        let setter = self
            .contract
            .property(getter.name())
            .and_then(|property| property.setter)
            .ok_or_else(|| MockError::UnwritableProperty(getter.name().to_string()))?;
        let param = self
            .contract
            .member(&setter)
            .and_then(|descriptor| descriptor.params.first())
            .ok_or_else(|| MockError::UnwritableProperty(getter.name().to_string()))?;
        let predicate = compile_argument(param, value)?;
        Ok(CompiledCall {
            member: setter,
            predicates: vec![predicate],
        })
    }

    fn property_getter(&self, getter: MemberId) -> Result<()> {
        let known = getter.kind() == MemberKind::Getter
            && self
                .contract
                .property(getter.name())
                .map_or(false, |property| property.getter == getter);
        if known {
            Ok(())
        } else {
            Err(MockError::UnsupportedExpressionShape(format!(
                "{} is not a property of {}",
                getter,
                self.contract.name()
            )))
        }
    }
}

fn compile_argument(param: &ParamDef, arg: ArgExpr) -> Result<ArgumentPredicate> {
    let check = |type_id: TypeId, type_name: &str| {
        if type_id == param.type_id {
            Ok(())
        } else {
            Err(MockError::UnsupportedExpressionShape(format!(
                "argument '{}' expects a {} but the expression supplies a {}",
                param.name, param.ty, type_name
            )))
        }
    };
    match arg {
        ArgExpr::Any => Ok(ArgumentPredicate::Any),
        ArgExpr::Predicate(matcher) => {
            check(matcher.type_id(), matcher.type_name())?;
            Ok(ArgumentPredicate::Satisfies(matcher))
        }
        ArgExpr::Value(value) => {
            check(value.type_id(), value.type_name())?;
            Ok(ArgumentPredicate::Equals(value))
        }
    }
}
