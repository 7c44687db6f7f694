//! Instruction neighbourhood query interface

use std::fmt::Debug;
use std::hash::Hash;

/// Shape of the right-hand side of an assignment
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RhsShape<'a> {
    /// Constructor ("new-object") expression of the named class
    NewObject(&'a str),
    /// Literal null
    Null,
    /// Calls, copies, casts, field reads and everything else
    Other,
}

/// Read-only questions about one instruction of a well-formed method body.
///
/// Queries about sites that do not belong to a method body known to the
/// implementation are outside the contract.
pub trait InstructionQuery {
    /// Identity of an instruction, including its enclosing method
    type Site: Copy + Eq + Hash + Debug;

    /// Does the instruction contain a call expression?
    fn contains_call(&self, site: Self::Site) -> bool;

    /// Resolved sub-signature of the call, `None` when there is no call
    fn call_signature(&self, site: Self::Site) -> Option<&str>;

    /// Is the instruction an assignment?
    fn is_assignment(&self, site: Self::Site) -> bool;

    /// Right-hand side shape, `None` when the instruction is not an assignment
    fn rhs_shape(&self, site: Self::Site) -> Option<RhsShape<'_>>;

    /// Lexical predecessor within the same method body
    fn predecessor(&self, site: Self::Site) -> Option<Self::Site>;

    /// Lexical successor within the same method body
    fn successor(&self, site: Self::Site) -> Option<Self::Site>;

    /// Signature of the enclosing method
    fn method_of(&self, site: Self::Site) -> &str;

    /// Local variable written by an assignment
    fn defined_local(&self, _site: Self::Site) -> Option<&str> {
        None
    }

    /// Base local of an instance call
    fn call_receiver(&self, _site: Self::Site) -> Option<&str> {
        None
    }

    /// Local passed as the `index`-th call argument
    fn call_arg_local(&self, _site: Self::Site, _index: usize) -> Option<&str> {
        None
    }
}
