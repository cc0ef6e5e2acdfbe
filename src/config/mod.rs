// ABOUTME: Configuration module root re-exporting the environment-backed server config
// ABOUTME: All runtime configuration comes from environment variables, never from files
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Salesgem Project

pub mod environment;

pub use environment::ServerConfig;
