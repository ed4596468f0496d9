//! Filter types for querying plans.

/// Filter options for listing plans.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PlanFilter {
    /// Only plans assigned to this player
    pub player_id: Option<String>,

    /// Include inactive and completed plans.
    /// If false, only each player's active plan is listed
    pub include_inactive: bool,
}

impl PlanFilter {
    /// Filter for one player's plans.
    ///
    /// ```rust
    /// use stride_core::models::PlanFilter;
    ///
    /// let filter = PlanFilter::for_player("player-7", true);
    /// assert_eq!(filter.player_id.as_deref(), Some("player-7"));
    /// assert!(filter.include_inactive);
    /// ```
    pub fn for_player(player_id: impl Into<String>, include_inactive: bool) -> Self {
        Self {
            player_id: Some(player_id.into()),
            include_inactive,
        }
    }
}
