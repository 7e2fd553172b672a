//! Display order of pull requests within one repository.
//!
//! Newest update first. Ties are broken by status (Ready before Draft),
//! then by title and link so the order is total.

use std::cmp::Ordering;

use crate::data::{PrStatus, PullRequest};

fn status_rank(status: PrStatus) -> u8 {
    match status {
        PrStatus::Open => 0,
        PrStatus::Draft => 1,
    }
}

pub fn compare(a: &PullRequest, b: &PullRequest) -> Ordering {
    b.updated_at()
        .cmp(&a.updated_at())
        .then_with(|| status_rank(a.status()).cmp(&status_rank(b.status())))
        .then_with(|| a.title().cmp(b.title()))
        .then_with(|| a.link().cmp(b.link()))
}

pub fn sort_pulls(pulls: &mut [PullRequest]) {
    pulls.sort_by(compare);
}
