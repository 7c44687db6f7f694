//! In-memory method bodies
//!
//! A [`Program`] is an ordered list of [`MethodBody`]s, each an ordered list of
//! [`Instruction`]s in the three-address form produced by bytecode lifters:
//! every call or allocation is its own instruction, optionally assigned to a
//! local.

use std::collections::HashMap;

use indexmap::IndexSet;
use serde::{Deserialize, Serialize};

use crate::errors::ReconstructionResult;
use crate::program::oracle::{ConcreteValue, Resolution, ValueOracle, ValueRef};
use crate::program::query::{InstructionQuery, RhsShape};

/// Call operand
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum Operand {
    Local(String),
    Int(i64),
    Str(String),
    Null,
}

/// Call expression
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CallExpr {
    /// Sub-signature of the called method
    pub subsignature: String,
    /// Base local for instance calls
    pub receiver: Option<String>,
    /// Arguments
    pub args: Vec<Operand>,
}

/// Expression computed by an instruction
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum Expr {
    Call(CallExpr),
    /// Allocation of the named class
    New(String),
    Null,
    Other,
}

/// A single instruction
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Instruction {
    /// Assigned local; `None` for plain statements
    pub target: Option<String>,
    pub expr: Expr,
}

impl Instruction {
    fn call(&self) -> Option<&CallExpr> {
        match &self.expr {
            Expr::Call(call) => Some(call),
            _ => None,
        }
    }
}

/// Body of one method
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MethodBody {
    /// Method signature
    pub signature: String,
    pub instructions: Vec<Instruction>,
}

impl MethodBody {
    pub fn new(signature: impl Into<String>) -> Self {
        Self {
            signature: signature.into(),
            instructions: Vec::new(),
        }
    }

    /// `target = receiver.subsignature(args)`
    pub fn assign_call(
        mut self,
        target: &str,
        receiver: Option<&str>,
        subsignature: &str,
        args: Vec<Operand>,
    ) -> Self {
        self.instructions.push(Instruction {
            target: Some(target.to_string()),
            expr: Expr::Call(CallExpr {
                subsignature: subsignature.to_string(),
                receiver: receiver.map(str::to_string),
                args,
            }),
        });
        self
    }

    /// `receiver.subsignature(args)` with the result discarded
    pub fn call(mut self, receiver: Option<&str>, subsignature: &str, args: Vec<Operand>) -> Self {
        self.instructions.push(Instruction {
            target: None,
            expr: Expr::Call(CallExpr {
                subsignature: subsignature.to_string(),
                receiver: receiver.map(str::to_string),
                args,
            }),
        });
        self
    }

    /// `target = new class_name`
    pub fn assign_new(mut self, target: &str, class_name: &str) -> Self {
        self.instructions.push(Instruction {
            target: Some(target.to_string()),
            expr: Expr::New(class_name.to_string()),
        });
        self
    }

    /// `target = null`
    pub fn assign_null(mut self, target: &str) -> Self {
        self.instructions.push(Instruction {
            target: Some(target.to_string()),
            expr: Expr::Null,
        });
        self
    }

    /// Any other instruction (copy, cast, return, branch)
    pub fn other(mut self, target: Option<&str>) -> Self {
        self.instructions.push(Instruction {
            target: target.map(str::to_string),
            expr: Expr::Other,
        });
        self
    }
}

/// Position of an instruction inside a [`Program`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct InstrSite {
    pub method: usize,
    pub index: usize,
}

impl InstrSite {
    pub fn new(method: usize, index: usize) -> Self {
        Self { method, index }
    }
}

/// A set of method bodies
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Program {
    methods: Vec<MethodBody>,
}

impl Program {
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse a program listing from JSON
    pub fn from_json_str(json: &str) -> ReconstructionResult<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Add a method and return its index
    pub fn add_method(&mut self, body: MethodBody) -> usize {
        self.methods.push(body);
        self.methods.len() - 1
    }

    pub fn method(&self, index: usize) -> Option<&MethodBody> {
        self.methods.get(index)
    }

    pub fn methods(&self) -> &[MethodBody] {
        &self.methods
    }

    /// Index of the method with the given signature
    pub fn method_index(&self, signature: &str) -> Option<usize> {
        self.methods.iter().position(|m| m.signature == signature)
    }

    /// Every instruction site of a method, in lexical order
    pub fn sites(&self, method: usize) -> Vec<InstrSite> {
        let len = self.methods.get(method).map_or(0, |m| m.instructions.len());
        (0..len).map(|index| InstrSite::new(method, index)).collect()
    }

    pub fn instruction(&self, site: InstrSite) -> Option<&Instruction> {
        self.methods
            .get(site.method)
            .and_then(|m| m.instructions.get(site.index))
    }
}

impl InstructionQuery for Program {
    type Site = InstrSite;

    fn contains_call(&self, site: InstrSite) -> bool {
        self.instruction(site).and_then(Instruction::call).is_some()
    }

    fn call_signature(&self, site: InstrSite) -> Option<&str> {
        self.instruction(site)
            .and_then(Instruction::call)
            .map(|call| call.subsignature.as_str())
    }

    fn is_assignment(&self, site: InstrSite) -> bool {
        self.instruction(site).map_or(false, |i| i.target.is_some())
    }

    fn rhs_shape(&self, site: InstrSite) -> Option<RhsShape<'_>> {
        let instruction = self.instruction(site)?;
        instruction.target.as_ref()?;
        Some(match &instruction.expr {
            Expr::New(class_name) => RhsShape::NewObject(class_name),
            Expr::Null => RhsShape::Null,
            Expr::Call(_) | Expr::Other => RhsShape::Other,
        })
    }

    fn predecessor(&self, site: InstrSite) -> Option<InstrSite> {
        if site.index == 0 {
            return None;
        }
        let previous = InstrSite::new(site.method, site.index - 1);
        self.instruction(previous).map(|_| previous)
    }

    fn successor(&self, site: InstrSite) -> Option<InstrSite> {
        let next = InstrSite::new(site.method, site.index + 1);
        self.instruction(next).map(|_| next)
    }

    fn method_of(&self, site: InstrSite) -> &str {
        self.methods
            .get(site.method)
            .map_or("<unknown method>", |m| m.signature.as_str())
    }

    fn defined_local(&self, site: InstrSite) -> Option<&str> {
        self.instruction(site).and_then(|i| i.target.as_deref())
    }

    fn call_receiver(&self, site: InstrSite) -> Option<&str> {
        self.instruction(site)
            .and_then(Instruction::call)
            .and_then(|call| call.receiver.as_deref())
    }

    fn call_arg_local(&self, site: InstrSite, index: usize) -> Option<&str> {
        match self.instruction(site).and_then(Instruction::call)?.args.get(index)? {
            Operand::Local(name) => Some(name.as_str()),
            _ => None,
        }
    }
}

/// Oracle answering from literal call arguments and caller-supplied facts.
///
/// Facts take precedence over literals. Anything else is `Unknown`.
#[derive(Debug, Clone)]
pub struct ConstantOracle<'p> {
    program: &'p Program,
    facts: HashMap<(InstrSite, ValueRef), IndexSet<ConcreteValue>>,
}

impl<'p> ConstantOracle<'p> {
    pub fn new(program: &'p Program) -> Self {
        Self {
            program,
            facts: HashMap::new(),
        }
    }

    /// Record values for `value` at `site`
    pub fn with_fact(
        mut self,
        site: InstrSite,
        value: ValueRef,
        values: impl IntoIterator<Item = ConcreteValue>,
    ) -> Self {
        self.facts.entry((site, value)).or_default().extend(values);
        self
    }
}

impl ValueOracle<InstrSite> for ConstantOracle<'_> {
    fn resolve(&self, value: ValueRef, at: InstrSite) -> Resolution {
        if let Some(values) = self.facts.get(&(at, value)) {
            return Resolution::Known(values.clone());
        }
        let ValueRef::Arg(index) = value else {
            return Resolution::Unknown;
        };
        let operand = self
            .program
            .instruction(at)
            .and_then(Instruction::call)
            .and_then(|call| call.args.get(index));
        match operand {
            Some(Operand::Int(v)) => Resolution::known([ConcreteValue::Int(*v)]),
            Some(Operand::Str(s)) => Resolution::known([ConcreteValue::Str(s.clone())]),
            _ => Resolution::Unknown,
        }
    }
}
