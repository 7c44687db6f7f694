//! Statement classifier
//!
//! Stateless predicates over an [`InstructionQuery`]. Each predicate looks at
//! one instruction and, for the two-instruction idioms, at its lexical
//! neighbour. Pairing accessors fail with
//! [`ReconstructionError::MalformedIdiom`] when the neighbour does not have the
//! expected shape.

use std::collections::HashSet;

use once_cell::sync::Lazy;
use serde::Serialize;

use crate::constants::signatures::signatures;
use crate::errors::{ReconstructionError, ReconstructionResult};
use crate::program::{InstructionQuery, RhsShape};

static ADD_VIEW: Lazy<HashSet<&'static str>> = Lazy::new(|| signatures::ADD_VIEW.iter().copied().collect());
static GET_VIEW: Lazy<HashSet<&'static str>> =
    Lazy::new(|| signatures::ADAPTER_GET_VIEW.iter().copied().collect());
static INFLATE: Lazy<HashSet<&'static str>> = Lazy::new(|| signatures::INFLATE.iter().copied().collect());
static GET_LIST_VIEW: Lazy<HashSet<&'static str>> =
    Lazy::new(|| signatures::GET_LIST_VIEW.iter().copied().collect());
static FIND_VIEW_BY_ID: Lazy<HashSet<&'static str>> =
    Lazy::new(|| signatures::FIND_VIEW_BY_ID.iter().copied().collect());

/// UI idiom an instruction takes part in
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum Idiom {
    /// `v = findViewById(id)` paired with `w = new View`
    FindViewById,
    /// `v = getChildAt(i)` paired with `w = new View`
    GetChildAt,
    Inflate,
    AddView,
    GetView,
    GetListView,
    NullAssignment,
    NewExpression,
}

/// Method name of a sub-signature `"ret name(p1,p2)"`
pub fn call_name(subsignature: &str) -> &str {
    let head = subsignature.split('(').next().unwrap_or(subsignature);
    head.rsplit(' ').next().unwrap_or(head)
}

/// Parameter types of a sub-signature
pub fn call_params(subsignature: &str) -> Vec<&str> {
    let Some(open) = subsignature.find('(') else {
        return Vec::new();
    };
    let close = subsignature.rfind(')').unwrap_or(subsignature.len());
    if close <= open {
        return Vec::new();
    }
    subsignature[open + 1..close]
        .split(',')
        .map(str::trim)
        .filter(|p| !p.is_empty())
        .collect()
}

fn call_in<Q: InstructionQuery>(query: &Q, site: Q::Site, set: &HashSet<&'static str>) -> bool {
    query.contains_call(site)
        && query
            .call_signature(site)
            .map_or(false, |signature| set.contains(signature))
}

fn is_new_object<Q: InstructionQuery>(query: &Q, site: Q::Site) -> bool {
    matches!(query.rhs_shape(site), Some(RhsShape::NewObject(_)))
}

fn is_lookup_call<Q: InstructionQuery>(query: &Q, site: Q::Site) -> bool {
    call_in(query, site, &FIND_VIEW_BY_ID)
}

fn is_child_at_call<Q: InstructionQuery>(query: &Q, site: Q::Site) -> bool {
    query.call_signature(site).map_or(false, |signature| {
        call_name(signature) == signatures::GET_CHILD_AT_NAME && call_params(signature) == ["int"]
    })
}

fn malformed<Q: InstructionQuery>(query: &Q, site: Q::Site, reason: &str) -> ReconstructionError {
    ReconstructionError::malformed(site, query.method_of(site), reason)
}

pub fn is_add_view<Q: InstructionQuery>(query: &Q, site: Q::Site) -> bool {
    call_in(query, site, &ADD_VIEW)
}

pub fn is_get_view<Q: InstructionQuery>(query: &Q, site: Q::Site) -> bool {
    call_in(query, site, &GET_VIEW)
}

pub fn is_inflate<Q: InstructionQuery>(query: &Q, site: Q::Site) -> bool {
    call_in(query, site, &INFLATE)
}

pub fn is_get_list_view<Q: InstructionQuery>(query: &Q, site: Q::Site) -> bool {
    call_in(query, site, &GET_LIST_VIEW)
}

pub fn is_null_assignment<Q: InstructionQuery>(query: &Q, site: Q::Site) -> bool {
    query.is_assignment(site) && matches!(query.rhs_shape(site), Some(RhsShape::Null))
}

pub fn is_new_expression<Q: InstructionQuery>(query: &Q, site: Q::Site) -> bool {
    query.is_assignment(site) && is_new_object(query, site)
}

/// The instruction or its predecessor resolves a view by identifier
pub fn is_find_view_by_id<Q: InstructionQuery>(query: &Q, site: Q::Site) -> bool {
    is_lookup_call(query, site)
        || query
            .predecessor(site)
            .map_or(false, |previous| is_lookup_call(query, previous))
}

/// Constructor instruction of a lookup pair.
///
/// Returns `site` when it already constructs, else its successor, which must
/// be an assignment of a constructor expression.
pub fn get_construction_instruction<Q: InstructionQuery>(
    query: &Q,
    site: Q::Site,
) -> ReconstructionResult<Q::Site> {
    if !is_find_view_by_id(query, site) {
        return Err(malformed(query, site, "not a view lookup"));
    }
    construction_of(query, site)
}

/// Lookup instruction of a lookup pair.
///
/// Returns `site` when it is the lookup call itself, else its predecessor,
/// which must be an assignment from the lookup call. The instruction after
/// the lookup may be a constructor or any other assignment, such as a cast.
pub fn get_lookup_instruction<Q: InstructionQuery>(
    query: &Q,
    site: Q::Site,
) -> ReconstructionResult<Q::Site> {
    if !is_find_view_by_id(query, site) {
        return Err(malformed(query, site, "not a view lookup"));
    }
    if !query.is_assignment(site) {
        return Err(malformed(query, site, "lookup idiom must be an assignment"));
    }
    if is_lookup_call(query, site) {
        return Ok(site);
    }
    match query.predecessor(site) {
        Some(previous) if query.is_assignment(previous) && is_lookup_call(query, previous) => Ok(previous),
        _ => Err(malformed(query, site, "not preceded by a view lookup assignment")),
    }
}

/// The instruction or its predecessor calls `getChildAt(int)`
pub fn is_get_child_at<Q: InstructionQuery>(query: &Q, site: Q::Site) -> bool {
    is_child_at_call(query, site)
        || query
            .predecessor(site)
            .map_or(false, |previous| is_child_at_call(query, previous))
}

/// Constructor instruction of a `getChildAt` pair
pub fn get_construction_from_get_child_at<Q: InstructionQuery>(
    query: &Q,
    site: Q::Site,
) -> ReconstructionResult<Q::Site> {
    if !is_get_child_at(query, site) {
        return Err(malformed(query, site, "not a getChildAt call"));
    }
    construction_of(query, site)
}

fn construction_of<Q: InstructionQuery>(query: &Q, site: Q::Site) -> ReconstructionResult<Q::Site> {
    if !query.is_assignment(site) {
        return Err(malformed(query, site, "idiom must be an assignment"));
    }
    if is_new_object(query, site) {
        return Ok(site);
    }
    match query.successor(site) {
        Some(next) if query.is_assignment(next) && is_new_object(query, next) => Ok(next),
        _ => Err(malformed(query, site, "wrong new expression for a view")),
    }
}

/// Every idiom the instruction satisfies, highest precedence first
pub fn classify<Q: InstructionQuery>(query: &Q, site: Q::Site) -> Vec<Idiom> {
    let checks: [(Idiom, fn(&Q, Q::Site) -> bool); 8] = [
        (Idiom::FindViewById, is_find_view_by_id::<Q>),
        (Idiom::GetChildAt, is_get_child_at::<Q>),
        (Idiom::Inflate, is_inflate::<Q>),
        (Idiom::AddView, is_add_view::<Q>),
        (Idiom::GetView, is_get_view::<Q>),
        (Idiom::GetListView, is_get_list_view::<Q>),
        (Idiom::NullAssignment, is_null_assignment::<Q>),
        (Idiom::NewExpression, is_new_expression::<Q>),
    ];
    checks
        .iter()
        .filter(|(_, check)| check(query, site))
        .map(|(idiom, _)| *idiom)
        .collect()
}

/// Highest-precedence idiom of the instruction
pub fn primary_idiom<Q: InstructionQuery>(query: &Q, site: Q::Site) -> Option<Idiom> {
    classify(query, site).into_iter().next()
}
