// SPDX-License-Identifier: Apache-2.0

pub(crate) mod cards;
pub(crate) mod directory;
pub mod errors;
pub(crate) mod pages;
pub mod request_tracing;
pub(crate) mod sheets;

pub(crate) async fn healthz_handler() -> &'static str {
    "ok"
}
