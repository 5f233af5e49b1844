/*
 * SPDX-FileCopyrightText: 2026 Wavelens GmbH <info@wavelens.io>
 *
 * SPDX-License-Identifier: AGPL-3.0-only
 */

pub mod consultant_assignment;
pub mod generation;
pub mod growth_community;
pub mod school;
pub mod user;
