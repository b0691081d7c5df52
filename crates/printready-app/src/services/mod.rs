// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Service layer — bridges the command handlers to the printready backend
// crates: where settings live and how a document is opened for rendering.

pub mod config_dir;
pub mod source;
