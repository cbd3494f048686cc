use crate::config::FragmentEngineConfig;
use crate::error::InvalidRequestError;
use crate::fragment::Fragment;
use itertools::Itertools;
use ldf_model::{
    BindingTable, Literal, NamedNode, PatternSlot, SolutionRow, Term, TermParseError,
    TriplePattern, TriplePosition, Variable,
};
use spargebra::algebra::GraphPattern;
use spargebra::term::GroundTerm;
use spargebra::Query;
use std::str::FromStr;

/// A request for one page of a fragment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FragmentRequest {
    pattern: TriplePattern,
    page: u64,
    page_size: u64,
    bindings: Option<BindingTable>,
}

impl FragmentRequest {
    /// Creates a request for the `page`-th page of `pattern`, counted from 1.
    pub fn new(
        pattern: TriplePattern,
        page: u64,
        page_size: u64,
    ) -> Result<Self, InvalidRequestError> {
        if page == 0 {
            return Err(InvalidRequestError::ZeroPage);
        }
        if page_size == 0 {
            return Err(InvalidRequestError::ZeroLimit);
        }

        Ok(Self {
            pattern,
            page,
            page_size,
            bindings: None,
        })
    }

    /// Restricts the fragment by `bindings`.
    pub fn with_bindings(mut self, bindings: BindingTable) -> Self {
        self.bindings = Some(bindings);
        self
    }

    /// Creates a request from the parameters of the fragment protocol.
    ///
    /// Missing or empty terms are variables. A `page` that is missing or not a positive number
    /// selects the first page. `values` holds a SPARQL `VALUES` block that restricts the fragment.
    pub fn from_parameters(
        subject: Option<&str>,
        predicate: Option<&str>,
        object: Option<&str>,
        page: Option<&str>,
        values: Option<&str>,
        config: &FragmentEngineConfig,
    ) -> Result<Self, InvalidRequestError> {
        let subject = parse_optional(subject, TriplePosition::Subject)?;
        let predicate = parse_optional(predicate, TriplePosition::Predicate)?;
        let object = parse_optional(object, TriplePosition::Object)?;

        let mut taken = [&subject, &predicate, &object]
            .into_iter()
            .filter_map(|slot| slot.as_ref().and_then(PatternSlot::as_variable))
            .cloned()
            .collect_vec();
        let mut slot_or_fresh = |slot: Option<PatternSlot>, name: &str| {
            slot.unwrap_or_else(|| {
                let variable = fresh_variable(name, &taken);
                taken.push(variable.clone());
                PatternSlot::Variable(variable)
            })
        };
        let pattern = TriplePattern {
            subject: slot_or_fresh(subject, "s"),
            predicate: slot_or_fresh(predicate, "p"),
            object: slot_or_fresh(object, "o"),
        };

        let page = page
            .and_then(|page| page.trim().parse::<u64>().ok())
            .unwrap_or(1)
            .max(1);
        let request = Self::new(pattern, page, config.page_size)?;

        match values {
            None => Ok(request),
            Some(values) => Ok(request.with_bindings(parse_values_parameter(values)?)),
        }
    }

    pub fn pattern(&self) -> &TriplePattern {
        &self.pattern
    }

    /// Returns the requested page, counted from 1.
    pub fn page(&self) -> u64 {
        self.page
    }

    pub fn bindings(&self) -> Option<&BindingTable> {
        self.bindings.as_ref()
    }

    /// Returns the number of matches before the requested page.
    pub fn offset(&self) -> u64 {
        self.page_size.saturating_mul(self.page - 1)
    }

    /// Returns the maximum number of triples in the requested page.
    pub fn limit(&self) -> u64 {
        self.page_size
    }
}

/// The hypermedia controls that link a fragment page to its neighbouring pages.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageLinks {
    pub first: u64,
    pub previous: Option<u64>,
    pub next: Option<u64>,
}

impl PageLinks {
    pub fn for_fragment(request: &FragmentRequest, fragment: &Fragment) -> Self {
        let offset = request.offset();
        let previous = (offset > 0).then(|| request.page() - 1);
        let next = (offset.saturating_add(request.limit()) < fragment.total_size())
            .then(|| request.page() + 1);
        Self {
            first: 1,
            previous,
            next,
        }
    }
}

/// Parses the value of a subject, predicate, or object parameter.
///
/// Returns [None] if the slot is unconstrained. This is the case for an empty value and for blank
/// nodes, which do not identify a term across requests. Terms are written as `?variable`,
/// `<iri>`, a bare IRI, or a literal such as `"text"`, `"text"@en`, or `"1"^^<datatype>`.
pub fn parse_term_parameter(
    value: &str,
    position: TriplePosition,
) -> Result<Option<PatternSlot>, InvalidRequestError> {
    let invalid = |message: String| InvalidRequestError::InvalidTerm {
        position,
        value: value.to_owned(),
        message,
    };

    if value.is_empty() || value.starts_with("_:") {
        return Ok(None);
    }

    if let Some(name) = value.strip_prefix('?') {
        let variable = Variable::new(name).map_err(|error| invalid(error.to_string()))?;
        return Ok(Some(PatternSlot::Variable(variable)));
    }

    let term: Term = if value.starts_with('<') {
        NamedNode::from_str(value)
            .map_err(|error| invalid(error.to_string()))?
            .into()
    } else if value.starts_with('"') {
        parse_literal(value)
            .map_err(|error| invalid(error.to_string()))?
            .into()
    } else {
        NamedNode::new(value)
            .map_err(|error| invalid(error.to_string()))?
            .into()
    };

    match (&term, position) {
        (Term::Literal(_), TriplePosition::Subject | TriplePosition::Predicate) => Err(invalid(
            format!("A literal is not allowed at position {position}"),
        )),
        _ => Ok(Some(PatternSlot::Bound(term))),
    }
}

/// Parses a SPARQL `VALUES` block such as `?x { <a> <b> }` or `(?x ?y) { (<a> UNDEF) }`.
pub fn parse_values_parameter(value: &str) -> Result<BindingTable, InvalidRequestError> {
    let query = Query::parse(&format!("SELECT * WHERE {{}} VALUES {value}"), None)
        .map_err(|error| InvalidRequestError::InvalidValues(error.to_string()))?;
    let Query::Select { pattern, .. } = &query else {
        return Err(InvalidRequestError::InvalidValues(
            "Expected a VALUES block".to_owned(),
        ));
    };
    let (variables, bindings) = find_values(pattern).ok_or_else(|| {
        InvalidRequestError::InvalidValues("Expected a VALUES block".to_owned())
    })?;

    let rows = bindings.iter().map(|row| {
        SolutionRow::new(
            row.iter()
                .map(|value| {
                    value.as_ref().map(|value| match value {
                        GroundTerm::NamedNode(nn) => Term::NamedNode(nn.clone()),
                        GroundTerm::Literal(lit) => Term::Literal(lit.clone()),
                    })
                })
                .collect(),
        )
    });
    Ok(BindingTable::try_new(variables.to_vec(), rows)?)
}

fn parse_optional(
    value: Option<&str>,
    position: TriplePosition,
) -> Result<Option<PatternSlot>, InvalidRequestError> {
    match value {
        None => Ok(None),
        Some(value) => parse_term_parameter(value, position),
    }
}

/// Parses a literal. A datatype may also be given without angle brackets.
fn parse_literal(value: &str) -> Result<Literal, TermParseError> {
    match value.rsplit_once("\"^^") {
        Some((lexical, datatype)) if !datatype.starts_with('<') => {
            Literal::from_str(&format!("{lexical}\"^^<{datatype}>"))
        }
        _ => Literal::from_str(value),
    }
}

fn find_values(
    pattern: &GraphPattern,
) -> Option<(&[Variable], &[Vec<Option<GroundTerm>>])> {
    match pattern {
        GraphPattern::Values {
            variables,
            bindings,
        } => Some((variables.as_slice(), bindings.as_slice())),
        GraphPattern::Project { inner, .. }
        | GraphPattern::Distinct { inner }
        | GraphPattern::Reduced { inner }
        | GraphPattern::Slice { inner, .. } => find_values(inner),
        GraphPattern::Join { left, right } => find_values(left).or_else(|| find_values(right)),
        _ => None,
    }
}

/// Returns a variable named `name` or, if taken, `name` with the smallest free numeric suffix.
fn fresh_variable(name: &str, taken: &[Variable]) -> Variable {
    let is_free = |candidate: &str| taken.iter().all(|variable| variable.as_str() != candidate);
    if is_free(name) {
        return Variable::new_unchecked(name);
    }
    (0_u32..)
        .map(|suffix| format!("{name}{suffix}"))
        .find(|candidate| is_free(candidate))
        .map(Variable::new_unchecked)
        .unwrap_or_else(|| Variable::new_unchecked(name))
}
