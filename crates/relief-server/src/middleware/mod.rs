pub(crate) mod request_tracing;
