// ABOUTME: Process-wide memory of the last Gemini endpoint and model that worked
// ABOUTME: Advisory cache shared by all requests and injectable for tests
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use tokio::sync::RwLock;

/// A base endpoint and model pair that answered successfully
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GeminiRoute {
    /// Base endpoint such as `https://generativelanguage.googleapis.com/v1`
    pub base_url: String,
    /// Model identifier without the `models/` prefix
    pub model: String,
}

/// Last working primary route
///
/// Concurrent writers may overwrite each other; any working route is an
/// acceptable value. Not persisted across restarts.
#[derive(Debug, Default)]
pub struct RouteCache {
    route: RwLock<Option<GeminiRoute>>,
}

impl RouteCache {
    /// Empty cache
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Currently remembered route
    pub async fn get(&self) -> Option<GeminiRoute> {
        self.route.read().await.clone()
    }

    /// Remember a working route
    pub async fn set(&self, route: GeminiRoute) {
        *self.route.write().await = Some(route);
    }

    /// Forget the remembered route
    pub async fn invalidate(&self) {
        *self.route.write().await = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_set_get_invalidate() {
        let cache = RouteCache::new();
        assert!(cache.get().await.is_none());

        let route = GeminiRoute {
            base_url: "https://example.test/v1".into(),
            model: "gemini-1.5-flash".into(),
        };
        cache.set(route.clone()).await;
        assert_eq!(cache.get().await, Some(route));

        cache.invalidate().await;
        assert!(cache.get().await.is_none());
    }
}
