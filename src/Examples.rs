//! examples of usage of RustedCalc
/// scalar evaluation, parsing, vector evaluation, plotting and export examples
pub mod calculator_examples;
