// ABOUTME: Re-exports application constants from the core crate
// ABOUTME: Environment names, vendor defaults, generation parameters and limits
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

pub use fitplan_core::constants::{
    defaults, env_config, generation, limits, network, service_names,
};
