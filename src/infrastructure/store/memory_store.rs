//! In-process store backend.
//!
//! Mirrors the Redis semantics the services rely on (expiry, integer
//! counters, sets, sorted-set ranks) for tests and local runs.

use async_trait::async_trait;
use std::collections::{HashMap, HashSet};
use std::time::Duration;
use tokio::sync::Mutex;
use tokio::time::Instant;

use crate::domain::repositories::{KeyValueStore, StoreError, StoreResult};

#[derive(Debug)]
enum Value {
    Str(String),
    Set(HashSet<String>),
    SortedSet(HashMap<String, f64>),
}

#[derive(Debug)]
struct Entry {
    value: Value,
    expires_at: Option<Instant>,
}

impl Entry {
    fn new(value: Value) -> Self {
        Self {
            value,
            expires_at: None,
        }
    }

    fn is_expired(&self, now: Instant) -> bool {
        self.expires_at.is_some_and(|at| at <= now)
    }
}

/// A `HashMap`-backed store behind an async mutex.
///
/// Expiry is evaluated lazily on access using `tokio::time::Instant`, so
/// tests can drive TTLs with a paused clock.
#[derive(Debug, Default)]
pub struct MemoryStore {
    entries: Mutex<HashMap<String, Entry>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

fn wrong_type(key: &str) -> StoreError {
    StoreError::Operation(format!(
        "WRONGTYPE Operation against a key holding the wrong kind of value: {}",
        key
    ))
}

/// Drops the entry for `key` if it has expired.
fn purge_expired(entries: &mut HashMap<String, Entry>, key: &str) {
    let now = Instant::now();
    if entries.get(key).is_some_and(|e| e.is_expired(now)) {
        entries.remove(key);
    }
}

/// Members ordered by ascending score, ties broken lexicographically.
fn sorted_members(members: &HashMap<String, f64>) -> Vec<String> {
    let mut ranked: Vec<(&String, f64)> = members.iter().map(|(m, s)| (m, *s)).collect();
    ranked.sort_by(|a, b| a.1.total_cmp(&b.1).then_with(|| a.0.cmp(b.0)));
    ranked.into_iter().map(|(m, _)| m.clone()).collect()
}

/// Resolves inclusive Redis-style rank bounds into a slice range.
fn rank_range(len: usize, start: isize, stop: isize) -> Option<std::ops::Range<usize>> {
    let len = len as isize;
    let start = if start < 0 { (start + len).max(0) } else { start };
    let stop = if stop < 0 { stop + len } else { stop.min(len - 1) };

    if len == 0 || start > stop || start >= len {
        return None;
    }

    Some(start as usize..stop as usize + 1)
}

/// Glob matching with `*` (any run) and `?` (any single character).
fn glob_match(pattern: &str, text: &str) -> bool {
    let p: Vec<char> = pattern.chars().collect();
    let t: Vec<char> = text.chars().collect();

    let (mut pi, mut ti) = (0, 0);
    let mut star: Option<usize> = None;
    let mut mark = 0;

    while ti < t.len() {
        if pi < p.len() && (p[pi] == '?' || p[pi] == t[ti]) {
            pi += 1;
            ti += 1;
        } else if pi < p.len() && p[pi] == '*' {
            star = Some(pi);
            mark = ti;
            pi += 1;
        } else if let Some(s) = star {
            pi = s + 1;
            mark += 1;
            ti = mark;
        } else {
            return false;
        }
    }

    while pi < p.len() && p[pi] == '*' {
        pi += 1;
    }

    pi == p.len()
}

#[async_trait]
impl KeyValueStore for MemoryStore {
    async fn get(&self, key: &str) -> StoreResult<Option<String>> {
        let mut entries = self.entries.lock().await;
        purge_expired(&mut entries, key);

        match entries.get(key) {
            None => Ok(None),
            Some(Entry {
                value: Value::Str(s),
                ..
            }) => Ok(Some(s.clone())),
            Some(_) => Err(wrong_type(key)),
        }
    }

    async fn set(&self, key: &str, value: &str) -> StoreResult<()> {
        let mut entries = self.entries.lock().await;
        entries.insert(key.to_string(), Entry::new(Value::Str(value.to_string())));
        Ok(())
    }

    async fn set_nx(&self, key: &str, value: &str) -> StoreResult<bool> {
        let mut entries = self.entries.lock().await;
        purge_expired(&mut entries, key);

        if entries.contains_key(key) {
            return Ok(false);
        }

        entries.insert(key.to_string(), Entry::new(Value::Str(value.to_string())));
        Ok(true)
    }

    async fn incr(&self, key: &str) -> StoreResult<i64> {
        let mut entries = self.entries.lock().await;
        purge_expired(&mut entries, key);

        let entry = entries
            .entry(key.to_string())
            .or_insert_with(|| Entry::new(Value::Str("0".to_string())));

        let Value::Str(current) = &mut entry.value else {
            return Err(wrong_type(key));
        };

        let next = current
            .parse::<i64>()
            .ok()
            .and_then(|n| n.checked_add(1))
            .ok_or_else(|| {
                StoreError::Operation(format!(
                    "ERR value is not an integer or out of range: {}",
                    key
                ))
            })?;

        *current = next.to_string();
        Ok(next)
    }

    async fn expire(&self, key: &str, ttl: Duration) -> StoreResult<()> {
        let mut entries = self.entries.lock().await;
        purge_expired(&mut entries, key);

        if let Some(entry) = entries.get_mut(key) {
            entry.expires_at = Some(Instant::now() + ttl);
        }

        Ok(())
    }

    async fn sadd(&self, key: &str, member: &str) -> StoreResult<()> {
        let mut entries = self.entries.lock().await;
        purge_expired(&mut entries, key);

        let entry = entries
            .entry(key.to_string())
            .or_insert_with(|| Entry::new(Value::Set(HashSet::new())));

        let Value::Set(members) = &mut entry.value else {
            return Err(wrong_type(key));
        };

        members.insert(member.to_string());
        Ok(())
    }

    async fn scard(&self, key: &str) -> StoreResult<i64> {
        let mut entries = self.entries.lock().await;
        purge_expired(&mut entries, key);

        match entries.get(key) {
            None => Ok(0),
            Some(Entry {
                value: Value::Set(members),
                ..
            }) => Ok(members.len() as i64),
            Some(_) => Err(wrong_type(key)),
        }
    }

    async fn zadd(&self, key: &str, member: &str, score: f64) -> StoreResult<()> {
        let mut entries = self.entries.lock().await;
        purge_expired(&mut entries, key);

        let entry = entries
            .entry(key.to_string())
            .or_insert_with(|| Entry::new(Value::SortedSet(HashMap::new())));

        let Value::SortedSet(members) = &mut entry.value else {
            return Err(wrong_type(key));
        };

        members.insert(member.to_string(), score);
        Ok(())
    }

    async fn zrevrange(&self, key: &str, start: isize, stop: isize) -> StoreResult<Vec<String>> {
        let mut entries = self.entries.lock().await;
        purge_expired(&mut entries, key);

        let members = match entries.get(key) {
            None => return Ok(Vec::new()),
            Some(Entry {
                value: Value::SortedSet(members),
                ..
            }) => members,
            Some(_) => return Err(wrong_type(key)),
        };

        let mut ranked = sorted_members(members);
        ranked.reverse();

        Ok(rank_range(ranked.len(), start, stop)
            .map(|range| ranked[range].to_vec())
            .unwrap_or_default())
    }

    async fn zremrangebyrank(&self, key: &str, start: isize, stop: isize) -> StoreResult<()> {
        let mut entries = self.entries.lock().await;
        purge_expired(&mut entries, key);

        let members = match entries.get_mut(key) {
            None => return Ok(()),
            Some(Entry {
                value: Value::SortedSet(members),
                ..
            }) => members,
            Some(_) => return Err(wrong_type(key)),
        };

        let ranked = sorted_members(members);
        if let Some(range) = rank_range(ranked.len(), start, stop) {
            for member in &ranked[range] {
                members.remove(member);
            }
        }

        if members.is_empty() {
            entries.remove(key);
        }

        Ok(())
    }

    async fn scan_keys(&self, pattern: &str) -> StoreResult<Vec<String>> {
        let mut entries = self.entries.lock().await;
        let now = Instant::now();
        entries.retain(|_, entry| !entry.is_expired(now));

        Ok(entries
            .keys()
            .filter(|key| glob_match(pattern, key))
            .cloned()
            .collect())
    }

    async fn ping(&self) -> StoreResult<()> {
        Ok(())
    }
}
