//! Amount formatting for generated documents.
//!
//! This module contains the Indian-numbering-system formatters used by the
//! rendering layer: conversion of rupee amounts to words, digit grouping in
//! the lakh/crore convention, and a best-effort parser that turns a
//! previously generated words string back into a number.

mod currency;
mod parse_words;
mod words;

pub use currency::format_inr;
pub use parse_words::parse_words;
pub use words::to_words;
