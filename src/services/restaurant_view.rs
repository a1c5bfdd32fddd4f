//! Long-lived per-restaurant views over the shift and employee feeds.
//!
//! A [`RestaurantView`] subscribes to both change feeds of one restaurant
//! and mirrors every snapshot into a [`LayeredSnapshot`]. The request
//! queue, calendars and day views are all derived from that local state,
//! so a successful local write shows up at once, before its snapshot is
//! delivered.
//!
//! Listeners read the newest published snapshot only once they hold the
//! write lock, so a view never applies a snapshot older than one already
//! published when the lock was taken.

use std::collections::HashMap;
use std::sync::Arc;

use color_eyre::eyre::{eyre, Report};
use tokio::sync::RwLock;
use tokio::task::JoinHandle;

use crate::app_state::{EmployeeStoreType, ShiftStoreType};
use crate::domain::{LayeredSnapshot, RestaurantId};

pub struct RestaurantView {
    snapshot: Arc<RwLock<LayeredSnapshot>>,
    listeners: Vec<JoinHandle<()>>,
}

impl RestaurantView {
    /// Subscribes to both feeds and waits for their current snapshots
    /// before returning, so a fresh view is never empty by accident.
    #[tracing::instrument(name = "Opening restaurant view", skip_all)]
    pub async fn open(
        restaurant_id: &RestaurantId,
        shift_store: &ShiftStoreType,
        employee_store: &EmployeeStoreType,
    ) -> Result<Self, Report> {
        let mut shifts = shift_store
            .write()
            .await
            .subscribe(restaurant_id)
            .await
            .map_err(|e| eyre!(e))?;
        let mut employees = employee_store
            .write()
            .await
            .subscribe(restaurant_id)
            .await
            .map_err(|e| eyre!(e))?;

        let initial_shifts = shifts
            .next()
            .await
            .ok_or_else(|| eyre!("shift feed closed before first snapshot"))?;
        let initial_employees = employees.next().await.ok_or_else(|| {
            eyre!("employee feed closed before first snapshot")
        })?;

        let snapshot = Arc::new(RwLock::new(LayeredSnapshot::new(
            initial_shifts,
            initial_employees,
        )));

        let shift_listener = {
            let snapshot = snapshot.clone();
            tokio::spawn(async move {
                while shifts.changed().await {
                    let mut snapshot = snapshot.write().await;
                    snapshot.apply_shift_snapshot(shifts.latest());
                }
                tracing::debug!("shift feed closed");
            })
        };
        let employee_listener = {
            let snapshot = snapshot.clone();
            tokio::spawn(async move {
                while employees.changed().await {
                    let mut snapshot = snapshot.write().await;
                    snapshot.apply_employee_snapshot(employees.latest());
                }
                tracing::debug!("employee feed closed");
            })
        };

        Ok(Self {
            snapshot,
            listeners: vec![shift_listener, employee_listener],
        })
    }

    pub fn snapshot(&self) -> &RwLock<LayeredSnapshot> {
        &self.snapshot
    }
}

impl Drop for RestaurantView {
    // Aborting a listener drops its subscription, which unsubscribes it.
    fn drop(&mut self) {
        for listener in &self.listeners {
            listener.abort();
        }
    }
}

/// Open views keyed by restaurant. Views are opened on first use and
/// closed when the restaurant's manager logs out.
#[derive(Default)]
pub struct RestaurantViews {
    views: HashMap<RestaurantId, Arc<RestaurantView>>,
}

impl RestaurantViews {
    pub async fn get_or_open(
        &mut self,
        restaurant_id: &RestaurantId,
        shift_store: &ShiftStoreType,
        employee_store: &EmployeeStoreType,
    ) -> Result<Arc<RestaurantView>, Report> {
        if let Some(view) = self.views.get(restaurant_id) {
            return Ok(view.clone());
        }
        let view = Arc::new(
            RestaurantView::open(restaurant_id, shift_store, employee_store)
                .await?,
        );
        self.views.insert(restaurant_id.clone(), view.clone());
        Ok(view)
    }

    pub fn close(&mut self, restaurant_id: &RestaurantId) {
        self.views.remove(restaurant_id);
    }

    pub fn is_open(&self, restaurant_id: &RestaurantId) -> bool {
        self.views.contains_key(restaurant_id)
    }
}
