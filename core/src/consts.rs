/*
 * SPDX-FileCopyrightText: 2026 Wavelens GmbH <info@wavelens.io>
 *
 * SPDX-License-Identifier: AGPL-3.0-only
 */

use std::ops::RangeInclusive;

pub const PORT_RANGE: RangeInclusive<usize> = 1..=65535;

/// Display label stored on every assignment written through the console.
pub const ASSIGNMENT_TYPE_COMPREHENSIVE: &str = "comprehensive";

pub const JWT_EXPIRY_HOURS: i64 = 24;
