use std::collections::HashMap;

use crate::domain::{
    ChangeFeed, Employee, EmployeeStore, EmployeeStoreError, RestaurantId,
    Subscription, Username,
};

#[derive(Default)]
pub struct HashmapEmployeeStore {
    employees: HashMap<RestaurantId, Vec<Employee>>,
    feed: ChangeFeed<Employee>,
}

impl HashmapEmployeeStore {
    fn collection(&self, restaurant_id: &RestaurantId) -> Vec<Employee> {
        self.employees
            .get(restaurant_id)
            .cloned()
            .unwrap_or_default()
    }
}

#[async_trait::async_trait]
impl EmployeeStore for HashmapEmployeeStore {
    async fn add_employee(
        &mut self,
        restaurant_id: &RestaurantId,
        employee: Employee,
    ) -> Result<(), EmployeeStoreError> {
        let employees =
            self.employees.entry(restaurant_id.clone()).or_default();
        if employees.iter().any(|e| e.username == employee.username) {
            return Err(EmployeeStoreError::UsernameExists);
        }
        employees.push(employee);

        let snapshot = self.collection(restaurant_id);
        self.feed.publish(restaurant_id, snapshot);
        Ok(())
    }

    async fn get_employees(
        &self,
        restaurant_id: &RestaurantId,
    ) -> Result<Vec<Employee>, EmployeeStoreError> {
        Ok(self.collection(restaurant_id))
    }

    async fn get_employee_by_username(
        &self,
        restaurant_id: &RestaurantId,
        username: &Username,
    ) -> Result<Employee, EmployeeStoreError> {
        self.employees
            .get(restaurant_id)
            .and_then(|employees| {
                employees.iter().find(|e| &e.username == username)
            })
            .cloned()
            .ok_or(EmployeeStoreError::EmployeeNotFound)
    }

    async fn subscribe(
        &mut self,
        restaurant_id: &RestaurantId,
    ) -> Result<Subscription<Employee>, EmployeeStoreError> {
        let current = self.collection(restaurant_id);
        Ok(self.feed.subscribe(restaurant_id, || current))
    }
}
