//! Pool-level tests driven by an in-memory page fetcher
