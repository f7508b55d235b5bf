//! Narration clip cache — bounded TTL cache for avatar narration media.
//!
//! Interviewer phrasing repeats constantly (greetings, acknowledgments,
//! transitions, closings), and each rendered clip costs vendor credits.
//! Only phrases on the fixed cacheable list are stored; everything else is
//! candidate-specific and would never hit again.
//!
//! The vendor services that produce the clips are out of scope; this module
//! is the collaborator interface the session layer stores their results in.

pub mod handlers;

use std::collections::HashMap;

use chrono::{DateTime, Duration, Utc};
use serde::Serialize;

/// Common interviewer phrases worth caching across interviews.
pub const CACHEABLE_PHRASES: &[&str] = &[
    // Greetings
    "Hello! I'm excited to interview you today.",
    "Welcome to your interview!",
    "Thank you for joining me today.",
    // Acknowledgments
    "That's interesting!",
    "Great!",
    "I see.",
    "That sounds fascinating!",
    "Excellent!",
    "That's a good point.",
    "Interesting approach.",
    "I understand.",
    // Transitions
    "Let me ask you about something else.",
    "Moving on to the next topic.",
    "That's helpful context. Now,",
    "Building on that,",
    "Given your experience,",
    // Conclusions
    "Thank you for sharing that with me.",
    "That concludes our interview.",
    "I appreciate your time today.",
    "This has been very insightful.",
];

const MAX_ENTRIES: usize = 100;
const TTL_HOURS: i64 = 24;

#[derive(Debug, Clone, Serialize)]
pub struct CachedClip {
    pub media_url: String,
    pub duration_ms: u64,
    pub cached_at: DateTime<Utc>,
}

#[derive(Debug, Serialize)]
pub struct CacheStats {
    pub total_cached: usize,
    pub expired: usize,
    pub max_entries: usize,
    pub ttl_hours: i64,
}

pub struct NarrationCache {
    clips: HashMap<String, CachedClip>,
    max_entries: usize,
    ttl: Duration,
}

impl Default for NarrationCache {
    fn default() -> Self {
        Self {
            clips: HashMap::new(),
            max_entries: MAX_ENTRIES,
            ttl: Duration::hours(TTL_HOURS),
        }
    }
}

impl NarrationCache {
    /// Whether a phrase belongs to the fixed cacheable list.
    pub fn is_cacheable(text: &str) -> bool {
        let normalized = text.trim().to_lowercase();
        CACHEABLE_PHRASES
            .iter()
            .any(|phrase| phrase.to_lowercase() == normalized)
    }

    /// Returns the cached clip for `(voice_id, text)` if present and fresh.
    /// Expired entries are dropped on access.
    pub fn get(&mut self, voice_id: &str, text: &str) -> Option<CachedClip> {
        let key = cache_key(voice_id, text);
        let expired = match self.clips.get(&key) {
            Some(clip) => Utc::now() - clip.cached_at > self.ttl,
            None => return None,
        };
        if expired {
            self.clips.remove(&key);
            return None;
        }
        self.clips.get(&key).cloned()
    }

    /// Stores a rendered clip. Non-cacheable phrases are ignored and `false`
    /// is returned. At capacity the oldest entry is evicted first.
    pub fn insert(&mut self, voice_id: &str, text: &str, media_url: String, duration_ms: u64) -> bool {
        if !Self::is_cacheable(text) {
            return false;
        }

        if self.clips.len() >= self.max_entries {
            if let Some(oldest) = self
                .clips
                .iter()
                .min_by_key(|(_, clip)| clip.cached_at)
                .map(|(key, _)| key.clone())
            {
                self.clips.remove(&oldest);
            }
        }

        self.clips.insert(
            cache_key(voice_id, text),
            CachedClip {
                media_url,
                duration_ms,
                cached_at: Utc::now(),
            },
        );
        true
    }

    /// Drops every expired entry, returning how many were removed.
    pub fn cleanup_expired(&mut self) -> usize {
        let now = Utc::now();
        let ttl = self.ttl;
        let before = self.clips.len();
        self.clips.retain(|_, clip| now - clip.cached_at <= ttl);
        before - self.clips.len()
    }

    pub fn stats(&self) -> CacheStats {
        let now = Utc::now();
        let expired = self
            .clips
            .values()
            .filter(|clip| now - clip.cached_at > self.ttl)
            .count();
        CacheStats {
            total_cached: self.clips.len(),
            expired,
            max_entries: self.max_entries,
            ttl_hours: self.ttl.num_hours(),
        }
    }
}

fn cache_key(voice_id: &str, text: &str) -> String {
    format!("{voice_id}:{}", text.trim().to_lowercase())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_only_listed_phrases_are_cacheable() {
        assert!(NarrationCache::is_cacheable("That's interesting!"));
        assert!(NarrationCache::is_cacheable("  THAT'S INTERESTING!  "));
        assert!(!NarrationCache::is_cacheable(
            "Tell me about the chatbot you built at Acme"
        ));
    }

    #[test]
    fn test_insert_and_get_round_trip() {
        let mut cache = NarrationCache::default();
        assert!(cache.insert("voice-a", "Great!", "https://cdn/clip1.mp4".to_string(), 900));
        let clip = cache.get("voice-a", "Great!").unwrap();
        assert_eq!(clip.media_url, "https://cdn/clip1.mp4");
        assert_eq!(clip.duration_ms, 900);
    }

    #[test]
    fn test_key_is_scoped_by_voice() {
        let mut cache = NarrationCache::default();
        cache.insert("voice-a", "Great!", "https://cdn/a.mp4".to_string(), 900);
        assert!(cache.get("voice-b", "Great!").is_none());
    }

    #[test]
    fn test_non_cacheable_phrase_is_never_stored() {
        let mut cache = NarrationCache::default();
        assert!(!cache.insert("voice-a", "A bespoke sentence", "url".to_string(), 100));
        assert!(cache.get("voice-a", "A bespoke sentence").is_none());
        assert_eq!(cache.stats().total_cached, 0);
    }

    #[test]
    fn test_expired_entry_is_not_returned() {
        let mut cache = NarrationCache::default();
        cache.insert("voice-a", "Great!", "url".to_string(), 100);
        // Backdate the entry past the TTL.
        for clip in cache.clips.values_mut() {
            clip.cached_at = Utc::now() - Duration::hours(TTL_HOURS + 1);
        }
        assert!(cache.get("voice-a", "Great!").is_none());
        assert_eq!(cache.stats().total_cached, 0);
    }

    #[test]
    fn test_cleanup_removes_only_expired_entries() {
        let mut cache = NarrationCache::default();
        cache.insert("voice-a", "Great!", "url1".to_string(), 100);
        cache.insert("voice-a", "I see.", "url2".to_string(), 100);
        if let Some(clip) = cache.clips.get_mut(&cache_key("voice-a", "Great!")) {
            clip.cached_at = Utc::now() - Duration::hours(TTL_HOURS + 1);
        }
        assert_eq!(cache.cleanup_expired(), 1);
        assert!(cache.get("voice-a", "I see.").is_some());
    }

    #[test]
    fn test_capacity_evicts_oldest_entry() {
        let mut cache = NarrationCache {
            max_entries: 2,
            ..Default::default()
        };
        cache.insert("voice-a", "Great!", "url1".to_string(), 100);
        cache.insert("voice-a", "I see.", "url2".to_string(), 100);
        // Make "Great!" clearly the oldest.
        if let Some(clip) = cache.clips.get_mut(&cache_key("voice-a", "Great!")) {
            clip.cached_at = Utc::now() - Duration::hours(1);
        }
        cache.insert("voice-a", "Excellent!", "url3".to_string(), 100);

        assert!(cache.stats().total_cached <= 2);
        assert!(cache.get("voice-a", "Great!").is_none());
        assert!(cache.get("voice-a", "Excellent!").is_some());
    }
}
