//! # gilt-tokens
//!
//! A design-token engine: themes described as nested token trees, resolved
//! through dot-path references and checked against WCAG contrast rules.
//!
//! ## Core Systems
//!
//! - **[`color`]**: hex/RGB/HSL conversions and color manipulation
//! - **[`contrast`]**: relative luminance, contrast ratios, WCAG thresholds
//! - **[`tokens`]**: token trees, paths, reference resolution, component tables
//! - **[`audit`]**: accessibility audit battery, scoring and reports
//! - **[`compose`]**: merging, extending and projecting themes
//! - **[`fluid`]**: viewport-interpolated `clamp()` sizes and scales
//! - **[`cache`]**: a bounded LRU cache and memoization
//! - **[`engine`]**: a facade owning configuration and caches
//!
//! ## Example
//!
//! ```
//! use gilt_tokens::{presets, TokenEngine, WcagLevel};
//!
//! let mut engine = TokenEngine::default();
//! let theme = presets::tech();
//! assert!(engine.passes(&theme, WcagLevel::AA).unwrap());
//! ```

// Foundation
pub mod error;
pub mod lexer;

// Colors
pub mod color;
pub mod contrast;

// Tokens
pub mod tokens;

// Analysis and composition
pub mod audit;
pub mod compose;
pub mod fluid;

// Engine
pub mod cache;
pub mod config;
pub mod engine;
pub mod presets;

pub use audit::{AccessibilityReport, AuditResult, Issue, Severity};
pub use cache::{memoize, LruCache};
pub use color::{ColorError, Hsl, Rgb};
pub use compose::ComposeError;
pub use config::EngineConfig;
pub use contrast::{contrast_ratio, TextSize, WcagLevel};
pub use engine::TokenEngine;
pub use error::{Error, Result};
pub use fluid::{FluidConfig, FluidError, FluidSize};
pub use tokens::{ResolveError, ResolvedTheme, Theme, TokenPath, TokenValue};
