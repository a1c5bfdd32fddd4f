use std::collections::HashMap;

use crate::domain::{
    ChangeFeed, EmployeeId, RestaurantId, Shift, ShiftId, ShiftStore,
    ShiftStoreError, Subscription,
};

#[derive(Default)]
pub struct HashmapShiftStore {
    shifts: HashMap<RestaurantId, Vec<Shift>>,
    feed: ChangeFeed<Shift>,
}

impl HashmapShiftStore {
    fn collection(&self, restaurant_id: &RestaurantId) -> Vec<Shift> {
        self.shifts.get(restaurant_id).cloned().unwrap_or_default()
    }

    fn publish(&mut self, restaurant_id: &RestaurantId) {
        let snapshot = self.collection(restaurant_id);
        self.feed.publish(restaurant_id, snapshot);
    }

    fn update(
        &mut self,
        restaurant_id: &RestaurantId,
        shift_id: &ShiftId,
        f: impl FnOnce(&mut Shift),
    ) -> Result<(), ShiftStoreError> {
        let shift = self
            .shifts
            .get_mut(restaurant_id)
            .and_then(|shifts| shifts.iter_mut().find(|s| &s.id == shift_id))
            .ok_or(ShiftStoreError::ShiftNotFound)?;
        f(shift);
        self.publish(restaurant_id);
        Ok(())
    }
}

#[async_trait::async_trait]
impl ShiftStore for HashmapShiftStore {
    async fn add_shift(
        &mut self,
        restaurant_id: &RestaurantId,
        shift: &Shift,
    ) -> Result<(), ShiftStoreError> {
        let shifts = self.shifts.entry(restaurant_id.clone()).or_default();
        if shifts.iter().any(|s| s.id == shift.id) {
            return Err(ShiftStoreError::ShiftIdExists);
        }
        shifts.push(shift.clone());
        self.publish(restaurant_id);
        Ok(())
    }

    async fn get_shift(
        &self,
        restaurant_id: &RestaurantId,
        shift_id: &ShiftId,
    ) -> Result<Shift, ShiftStoreError> {
        self.shifts
            .get(restaurant_id)
            .and_then(|shifts| shifts.iter().find(|s| &s.id == shift_id))
            .cloned()
            .ok_or(ShiftStoreError::ShiftNotFound)
    }

    async fn get_shifts(
        &self,
        restaurant_id: &RestaurantId,
    ) -> Result<Vec<Shift>, ShiftStoreError> {
        Ok(self.collection(restaurant_id))
    }

    async fn overwrite_shift(
        &mut self,
        restaurant_id: &RestaurantId,
        shift: &Shift,
    ) -> Result<(), ShiftStoreError> {
        self.update(restaurant_id, &shift.id, |stored| {
            *stored = shift.clone()
        })
    }

    async fn delete_shift(
        &mut self,
        restaurant_id: &RestaurantId,
        shift_id: &ShiftId,
    ) -> Result<(), ShiftStoreError> {
        let shifts = self
            .shifts
            .get_mut(restaurant_id)
            .ok_or(ShiftStoreError::ShiftNotFound)?;
        let before = shifts.len();
        shifts.retain(|s| &s.id != shift_id);
        if shifts.len() == before {
            return Err(ShiftStoreError::ShiftNotFound);
        }
        self.publish(restaurant_id);
        Ok(())
    }

    async fn add_request(
        &mut self,
        restaurant_id: &RestaurantId,
        shift_id: &ShiftId,
        employee_id: &EmployeeId,
    ) -> Result<(), ShiftStoreError> {
        self.update(restaurant_id, shift_id, |shift| {
            shift.add_request(employee_id)
        })
    }

    async fn remove_request(
        &mut self,
        restaurant_id: &RestaurantId,
        shift_id: &ShiftId,
        employee_id: &EmployeeId,
    ) -> Result<(), ShiftStoreError> {
        self.update(restaurant_id, shift_id, |shift| {
            shift.reject_request(employee_id);
        })
    }

    async fn accept_request(
        &mut self,
        restaurant_id: &RestaurantId,
        shift_id: &ShiftId,
        employee_id: &EmployeeId,
    ) -> Result<Shift, ShiftStoreError> {
        let shift = self
            .shifts
            .get_mut(restaurant_id)
            .and_then(|shifts| shifts.iter_mut().find(|s| &s.id == shift_id))
            .ok_or(ShiftStoreError::ShiftNotFound)?;
        if !shift.accept_request(employee_id) {
            return Err(ShiftStoreError::RequestNotFound);
        }
        let accepted = shift.clone();
        self.publish(restaurant_id);
        Ok(accepted)
    }

    async fn subscribe(
        &mut self,
        restaurant_id: &RestaurantId,
    ) -> Result<Subscription<Shift>, ShiftStoreError> {
        let current = self.collection(restaurant_id);
        Ok(self.feed.subscribe(restaurant_id, || current))
    }
}
