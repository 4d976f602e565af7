// src/domain/classify.rs

use crate::upstream::UpstreamError;
use serde::Serialize;
use std::thread;
use tracing::warn;

/// ZPIDs seen in practice run from 5 to 12 digits.
const ZPID_DIGITS: std::ops::RangeInclusive<usize> = 5..=12;

/// Upper bound on address lookups in flight for one input.
pub const RESOLVE_CONCURRENCY: usize = 8;

/// Maps a postal address to the ZPIDs the upstream knows for it.
pub trait AddressResolver: Sync {
    fn resolve(&self, address: &str) -> Result<Vec<String>, UpstreamError>;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TokenKind {
    Zpid,
    Address,
    Invalid,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AddressResult {
    pub address: String,
    pub found: bool,
    pub zpids: Vec<String>,
}

impl AddressResult {
    fn not_found(address: &str) -> Self {
        Self {
            address: address.to_string(),
            found: false,
            zpids: Vec::new(),
        }
    }
}

/// The outcome of parsing one free-text block. Every non-empty token lands
/// in exactly one of `zpids`, `address_results` or `invalid_entries`.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ClassifiedInput {
    pub zpids: Vec<String>,
    pub address_results: Vec<AddressResult>,
    pub invalid_entries: Vec<String>,
    pub total_properties_found: usize,
}

impl ClassifiedInput {
    /// Direct ZPIDs followed by resolved ones, first occurrence kept.
    pub fn unified_zpids(&self) -> Vec<String> {
        let resolved = self.address_results.iter().flat_map(|r| r.zpids.iter());

        let mut out: Vec<String> = Vec::new();
        for zpid in self.zpids.iter().chain(resolved) {
            if !out.contains(zpid) {
                out.push(zpid.clone());
            }
        }
        out
    }
}

/// Splits on commas and newlines, trims, and drops empty tokens.
pub fn split_tokens(raw: &str) -> Vec<&str> {
    raw.split([',', '\n', '\r'])
        .map(str::trim)
        .filter(|t| !t.is_empty())
        .collect()
}

/// A ZPID is all digits within the plausible length range. An address needs
/// a street number, a word, and a space between them. Everything else is
/// invalid.
pub fn token_kind(token: &str) -> TokenKind {
    if token.chars().all(|c| c.is_ascii_digit()) {
        return if ZPID_DIGITS.contains(&token.len()) {
            TokenKind::Zpid
        } else {
            TokenKind::Invalid
        };
    }

    let has_digit = token.chars().any(|c| c.is_ascii_digit());
    let has_letter = token.chars().any(char::is_alphabetic);
    let has_space = token.chars().any(char::is_whitespace);

    if has_digit && has_letter && has_space {
        TokenKind::Address
    } else {
        TokenKind::Invalid
    }
}

/// Classifies `raw` and resolves its address candidates.
///
/// Resolutions run in parallel, at most `RESOLVE_CONCURRENCY` at a time;
/// results are put back in input order. A failed resolution is recorded as
/// not found, never raised.
pub fn classify<R>(raw: &str, resolver: &R) -> ClassifiedInput
where
    R: AddressResolver + ?Sized,
{
    let mut zpids = Vec::new();
    let mut addresses = Vec::new();
    let mut invalid_entries = Vec::new();

    for token in split_tokens(raw) {
        match token_kind(token) {
            TokenKind::Zpid => zpids.push(token.to_string()),
            TokenKind::Address => addresses.push(token),
            TokenKind::Invalid => invalid_entries.push(token.to_string()),
        }
    }

    let address_results = resolve_all(resolver, &addresses);

    let total_properties_found =
        zpids.len() + address_results.iter().map(|r| r.zpids.len()).sum::<usize>();

    ClassifiedInput {
        zpids,
        address_results,
        invalid_entries,
        total_properties_found,
    }
}

fn resolve_all<R>(resolver: &R, addresses: &[&str]) -> Vec<AddressResult>
where
    R: AddressResolver + ?Sized,
{
    let mut results = Vec::with_capacity(addresses.len());

    for group in addresses.chunks(RESOLVE_CONCURRENCY) {
        thread::scope(|s| {
            let handles: Vec<_> = group
                .iter()
                .map(|&address| {
                    thread::Builder::new()
                        .spawn_scoped(s, move || resolve_one(resolver, address))
                        .map_err(|e| warn!("Resolving {address:?} inline: {e}"))
                })
                .collect();

            for (handle, &address) in handles.into_iter().zip(group) {
                let result = match handle {
                    Ok(handle) => handle
                        .join()
                        .unwrap_or_else(|_| AddressResult::not_found(address)),
                    Err(()) => resolve_one(resolver, address),
                };
                results.push(result);
            }
        });
    }

    results
}

fn resolve_one<R>(resolver: &R, address: &str) -> AddressResult
where
    R: AddressResolver + ?Sized,
{
    match resolver.resolve(address) {
        Ok(zpids) => AddressResult {
            address: address.to_string(),
            found: !zpids.is_empty(),
            zpids,
        },
        Err(e) => {
            warn!("Address resolution failed for {address:?}: {e}");
            AddressResult::not_found(address)
        }
    }
}
