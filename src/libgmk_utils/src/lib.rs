// Copyright 2026 Gomoku Project Contributors
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

//! Shared, domain-agnostic plumbing: the error type every other crate in the
//! workspace raises, and the settings/config primitives that don't belong to
//! any single domain crate.

pub mod config;
pub mod error;

pub use config::{default_settings_path, load_json, store_json, BoardPrintSettings, WorkerSettings};
pub use error::GomokuError;
