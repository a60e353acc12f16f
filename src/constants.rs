//! # Constants and type definitions for Anisomap
//!
//! This module centralizes the **filesystem conventions**, **map-format
//! constants**, and **common type definitions** used throughout the
//! `anisomap` library.
//!
//! ## Overview
//!
//! - Project and per-user data roots on the analysis filesystem
//! - Daily/merged map directory names
//! - HEALPix map channel layout (FITS binary-table column names)
//! - Core type aliases used across the crate
//!
//! These definitions are used by all main modules, including map selection,
//! merging, and directory reconciliation.

// -------------------------------------------------------------------------------------------------
// Filesystem layout
// -------------------------------------------------------------------------------------------------

/// Read-only project data root holding the published analysis products
pub const DATA_ANA_ROOT: &str = "/data/ana/CosmicRay/Anisotropy/IceCube";

/// Root under which every user keeps a private scratch area
pub const DATA_USER_ROOT: &str = "/data/user";

/// Subdirectory of a map prefix holding per-configuration merged maps
pub const MERGED_DIR: &str = "merged";

/// Subdirectory of a map prefix holding detector-year merged maps
pub const DETECTOR_MERGE_DIR: &str = "detector_merge";

// -------------------------------------------------------------------------------------------------
// Map format
// -------------------------------------------------------------------------------------------------

/// Number of pixel channels carried by a standard sky map (data, background, local)
pub const MAP_CHANNELS: usize = 3;

/// FITS binary-table column names for the map channels, in storage order.
///
/// Daily maps are written with the healpy naming convention, so the first
/// three columns reuse the temperature/polarisation labels regardless of
/// their physical meaning here.
pub const CHANNEL_COLUMNS: [&str; 3] = ["TEMPERATURE", "Q_POLARISATION", "U_POLARISATION"];

// -------------------------------------------------------------------------------------------------
// Calendar conventions
// -------------------------------------------------------------------------------------------------

/// Month and day (MM-DD) at which a detector calendar year begins by default
pub const DEFAULT_START_DATE: &str = "05-13";

// -------------------------------------------------------------------------------------------------
// Type aliases
// -------------------------------------------------------------------------------------------------

/// Detector configuration label (e.g. `IC59`, `IC86-2011`)
pub type ConfigName = String;

/// Grouping key formed from the parameter tokens of a map filename
pub type ParamKey = String;
