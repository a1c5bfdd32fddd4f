use crate::domain::{
    Restaurant, RestaurantCode, RestaurantId, RestaurantStore,
    RestaurantStoreError,
};
use std::collections::HashMap;

#[derive(Default)]
pub struct HashmapRestaurantStore {
    restaurants: HashMap<RestaurantId, Restaurant>,
}

#[async_trait::async_trait]
impl RestaurantStore for HashmapRestaurantStore {
    async fn add_restaurant(
        &mut self,
        restaurant: Restaurant,
    ) -> Result<(), RestaurantStoreError> {
        if self.restaurants.values().any(|r| r.code == restaurant.code) {
            return Err(RestaurantStoreError::RestaurantCodeExists);
        }
        self.restaurants.insert(restaurant.id.clone(), restaurant);
        Ok(())
    }

    async fn get_restaurant(
        &self,
        id: &RestaurantId,
    ) -> Result<Restaurant, RestaurantStoreError> {
        self.restaurants
            .get(id)
            .cloned()
            .ok_or(RestaurantStoreError::RestaurantNotFound)
    }

    async fn get_restaurant_by_code(
        &self,
        code: &RestaurantCode,
    ) -> Result<Restaurant, RestaurantStoreError> {
        self.restaurants
            .values()
            .find(|r| &r.code == code)
            .cloned()
            .ok_or(RestaurantStoreError::RestaurantNotFound)
    }
}
