// ABOUTME: Subcommand implementations for salesgem-cli
// ABOUTME: Each module owns the user-facing output of one command family
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Salesgem Project

pub mod auth;
pub mod course;
pub mod gems;
pub mod import;
pub mod invite;
pub mod profile;
