// src/circuits/mod.rs

//! Ordered sequences of gate instructions.
//!
//! A [`Circuit`] is applied left to right. Circuits can be assembled from
//! typed [`Operation`]s or loaded from instruction text; text is parsed when
//! the circuit is built, so unknown gates fail before any simulation starts.

use crate::core::{QuditError, QuditId, QuditResult};
use crate::operations::Operation;
use std::collections::BTreeSet;
use std::fmt;

/// An ordered list of operations.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Circuit {
    operations: Vec<Operation>,
}

impl Circuit {
    /// Creates a new, empty circuit.
    pub fn new() -> Self {
        Self::default()
    }

    /// Parses every instruction, failing on the first unknown or malformed one.
    ///
    /// ```
    /// # use qudit_sim::{Circuit, QuditResult};
    /// # fn main() -> QuditResult<()> {
    /// let circuit = Circuit::parse(["h-0", "cx-0,1", "rz(pi/4)-1"])?;
    /// assert_eq!(circuit.len(), 3);
    /// # Ok(())
    /// # }
    /// ```
    pub fn parse<I, S>(instructions: I) -> QuditResult<Self>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let operations = instructions
            .into_iter()
            .map(|text| text.as_ref().parse::<Operation>())
            .collect::<QuditResult<Vec<_>>>()?;
        Ok(Self { operations })
    }

    /// Appends an operation.
    pub fn add_operation(&mut self, op: Operation) {
        self.operations.push(op);
    }

    /// Appends several operations in order.
    pub fn add_operations<I>(&mut self, ops: I)
    where
        I: IntoIterator<Item = Operation>,
    {
        self.operations.extend(ops);
    }

    /// The operations in application order.
    pub fn operations(&self) -> &[Operation] {
        &self.operations
    }

    /// Every qudit touched by some operation, ascending.
    pub fn qudits(&self) -> BTreeSet<QuditId> {
        self.operations.iter().flat_map(|op| op.involved_qudits()).collect()
    }

    /// Number of operations.
    pub fn len(&self) -> usize {
        self.operations.len()
    }

    /// `true` if the circuit contains no operations.
    pub fn is_empty(&self) -> bool {
        self.operations.is_empty()
    }

    /// Instruction text of every operation, in order.
    pub fn instructions(&self) -> Vec<String> {
        self.operations.iter().map(|op| op.to_string()).collect()
    }
}

impl FromIterator<Operation> for Circuit {
    fn from_iter<I: IntoIterator<Item = Operation>>(iter: I) -> Self {
        Self {
            operations: iter.into_iter().collect(),
        }
    }
}

impl fmt::Display for Circuit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Circuit[{} operations]", self.operations.len())?;
        for (step, op) in self.operations.iter().enumerate() {
            write!(f, "\n  {:04}: {}", step + 1, op)?;
        }
        Ok(())
    }
}

//-------------------------------------------------------------------------
// Circuit Builder
//-------------------------------------------------------------------------

/// Fluent construction of a [`Circuit`].
///
/// Typed operations are infallible; instruction text is parsed eagerly and the
/// first parse error is reported by [`build`](CircuitBuilder::build).
#[derive(Debug, Default)]
pub struct CircuitBuilder {
    circuit: Circuit,
    error: Option<QuditError>,
}

impl CircuitBuilder {
    /// Creates a new, empty CircuitBuilder.
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a single operation.
    pub fn add_op(mut self, op: Operation) -> Self {
        self.circuit.add_operation(op);
        self
    }

    /// Adds multiple operations.
    pub fn add_ops<I>(mut self, ops: I) -> Self
    where
        I: IntoIterator<Item = Operation>,
    {
        self.circuit.add_operations(ops);
        self
    }

    /// Parses and adds one textual instruction, e.g. `"cx-0,1"`.
    pub fn add_instruction(mut self, text: &str) -> Self {
        if self.error.is_none() {
            match text.parse::<Operation>() {
                Ok(op) => self.circuit.add_operation(op),
                Err(e) => self.error = Some(e),
            }
        }
        self
    }

    /// Finalizes the circuit, reporting the first instruction that failed to parse.
    pub fn build(self) -> QuditResult<Circuit> {
        match self.error {
            Some(e) => Err(e),
            None => Ok(self.circuit),
        }
    }
}
