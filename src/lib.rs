//! # Calculus Agent
//!
//! An agent that integrates and differentiates polynomial problems stated in
//! natural language.
//!
//! This library provides:
//! - A deterministic polynomial term engine ([`poly`]): parsing, power rule,
//!   display notation and round-trip verification
//! - Engine operations exposed as JSON tools ([`tools`])
//! - A tool-calling agent loop driven by an OpenAI-compatible model ([`agent`])
//!
//! ## Example
//!
//! ```rust
//! use calculus_agent::poly;
//!
//! let terms = poly::parse("∫4x^6 - 2x^3 + 7x - 4 dx");
//! let integral = poly::integrate_polynomial(&terms).unwrap();
//! assert_eq!(
//!     poly::render(&integral),
//!     "\\frac{4x^{7}}{7} - \\frac{1x^{4}}{2} + \\frac{7x^{2}}{2} - 4x + C"
//! );
//! assert!(poly::verify_round_trip(&terms).unwrap().is_pass());
//! ```

pub mod agent;
pub mod config;
pub mod llm;
pub mod poly;
pub mod preferences;
pub mod tools;

pub use config::Config;
