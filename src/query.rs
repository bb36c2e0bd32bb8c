//! Pure transforms over the in-memory user collection: search filtering
//! and fixed-size pagination. No I/O here.

use crate::api::User;

/// One page of a (possibly filtered) user collection.
#[derive(Clone, Debug, PartialEq)]
pub struct Page {
    pub items: Vec<User>,
    pub total: usize,
    pub page: usize,
    pub limit: usize,
    pub total_pages: usize,
}

/// Case-insensitive substring filter over name, email and username.
///
/// A record is kept when any of the three fields contains the trimmed,
/// lowercased term. A blank or whitespace-only term returns the input
/// unchanged. Input order is preserved.
pub fn filter_users(users: &[User], search_term: &str) -> Vec<User> {
    let term = search_term.trim().to_lowercase();
    if term.is_empty() {
        return users.to_vec();
    }
    users
        .iter()
        .filter(|u| {
            u.name.to_lowercase().contains(&term)
                || u.email.to_lowercase().contains(&term)
                || u.username.to_lowercase().contains(&term)
        })
        .cloned()
        .collect()
}

/// Slice `users` into page `page` (1-based) of size `limit`.
///
/// Does not clamp `page`: an out-of-range page yields empty `items` and no
/// error. `total_pages` is `ceil(total / limit)`, 0 for an empty input.
/// `limit` must be positive; that is enforced at the CLI boundary.
pub fn paginate_users(users: &[User], page: usize, limit: usize) -> Page {
    debug_assert!(limit > 0, "page limit must be positive");
    let total = users.len();
    let start = page.saturating_sub(1).saturating_mul(limit);
    let end = start.saturating_add(limit).min(total);
    let items = if start < total {
        users[start..end].to_vec()
    } else {
        Vec::new()
    };
    Page {
        items,
        total,
        page,
        limit,
        total_pages: total.div_ceil(limit),
    }
}
