//! Per-invocation memoized state
//!
//! The resolved upstream remote and the resolved check lists are stable for
//! the lifetime of one command invocation, so they live on an [`Invocation`]
//! context that is created at command start and discarded at command end.
//! Nothing here is persisted.

use crate::error::Result;
use std::cell::RefCell;
use std::collections::HashMap;

/// Memoization scope for a single command invocation
#[derive(Debug, Default)]
pub struct Invocation {
    upstream: RefCell<Option<String>>,
    check_lists: RefCell<HashMap<String, Vec<String>>>,
}

impl Invocation {
    /// Fresh context with nothing memoized
    pub fn new() -> Self {
        Self::default()
    }

    /// The upstream remote, resolving it through `resolve` on first use
    pub fn upstream_with(&self, resolve: impl FnOnce() -> Result<String>) -> Result<String> {
        if let Some(remote) = self.upstream.borrow().as_ref() {
            return Ok(remote.clone());
        }
        let remote = resolve()?;
        *self.upstream.borrow_mut() = Some(remote.clone());
        Ok(remote)
    }

    /// The check list for `kind`, resolving it through `resolve` on first use
    ///
    /// Re-resolution never occurs within one invocation: a second call for the
    /// same kind returns the cached list without consulting `resolve`.
    pub fn check_list_with(
        &self,
        kind: &str,
        resolve: impl FnOnce() -> Result<Vec<String>>,
    ) -> Result<Vec<String>> {
        if let Some(list) = self.check_lists.borrow().get(kind) {
            return Ok(list.clone());
        }
        let list = resolve()?;
        self.check_lists
            .borrow_mut()
            .insert(kind.to_string(), list.clone());
        Ok(list)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_upstream_resolved_once() {
        let invocation = Invocation::new();
        let mut calls = 0;
        for _ in 0..3 {
            let remote = invocation
                .upstream_with(|| {
                    calls += 1;
                    Ok("origin".to_string())
                })
                .unwrap();
            assert_eq!(remote, "origin");
        }
        assert_eq!(calls, 1);
    }

    #[test]
    fn test_upstream_failure_is_not_cached() {
        let invocation = Invocation::new();
        let err = invocation
            .upstream_with(|| Err(crate::error::Error::UnresolvableUpstream(vec![])));
        assert!(err.is_err());
        // A later successful resolution still works.
        let remote = invocation
            .upstream_with(|| Ok("upstream".to_string()))
            .unwrap();
        assert_eq!(remote, "upstream");
    }

    #[test]
    fn test_check_lists_cached_per_kind() {
        let invocation = Invocation::new();
        let mut calls = 0;
        for _ in 0..2 {
            invocation
                .check_list_with("lint", || {
                    calls += 1;
                    Ok(vec!["cargo clippy".to_string()])
                })
                .unwrap();
        }
        invocation
            .check_list_with("unit", || {
                calls += 1;
                Ok(vec!["cargo test".to_string()])
            })
            .unwrap();
        assert_eq!(calls, 2);
    }
}
