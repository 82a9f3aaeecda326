//! In-memory `Store` for command tests

use std::sync::Mutex;

use async_trait::async_trait;
use lightbnb_db::{
    DbError, NewProperty, NewUser, Property, PropertyFilter, PropertyView, ReservationView,
    Result, Store, User,
};

#[derive(Default)]
pub struct FakeStore {
    users: Mutex<Vec<User>>,
    properties: Mutex<Vec<Property>>,
    reservations: Vec<(i32, ReservationView)>,
    fail: bool,
}

impl FakeStore {
    pub fn with_user(name: &str, email: &str) -> Self {
        let store = Self::default();
        store.users.lock().unwrap().push(User {
            id: 1,
            name: name.to_string(),
            email: email.to_string(),
            password: "password".to_string(),
        });
        store
    }

    pub fn with_reservations(guest_id: i32, reservations: Vec<ReservationView>) -> Self {
        Self {
            reservations: reservations.into_iter().map(|r| (guest_id, r)).collect(),
            ..Self::default()
        }
    }

    pub fn failing() -> Self {
        Self {
            fail: true,
            ..Self::default()
        }
    }

    fn check(&self) -> Result<()> {
        if self.fail {
            return Err(DbError::Query {
                code: Some("57014".to_string()),
                message: "canceling statement due to statement timeout".to_string(),
            });
        }
        Ok(())
    }
}

#[async_trait]
impl Store for FakeStore {
    async fn get_user_with_email(&self, email: &str) -> Result<Option<User>> {
        self.check()?;
        let users = self.users.lock().unwrap();
        Ok(users.iter().find(|u| u.email == email).cloned())
    }

    async fn get_user_with_id(&self, id: i32) -> Result<Option<User>> {
        self.check()?;
        let users = self.users.lock().unwrap();
        Ok(users.iter().find(|u| u.id == id).cloned())
    }

    async fn add_user(&self, user: &NewUser) -> Result<User> {
        self.check()?;
        let mut users = self.users.lock().unwrap();
        let created = User {
            id: users.len() as i32 + 1,
            name: user.name.clone(),
            email: user.email.clone(),
            password: user.password.clone(),
        };
        users.push(created.clone());
        Ok(created)
    }

    async fn get_all_reservations(
        &self,
        guest_id: i32,
        limit: u32,
    ) -> Result<Vec<ReservationView>> {
        self.check()?;
        Ok(self
            .reservations
            .iter()
            .filter(|(guest, _)| *guest == guest_id)
            .map(|(_, r)| r.clone())
            .take(limit as usize)
            .collect())
    }

    async fn get_all_properties(
        &self,
        filter: &PropertyFilter,
        limit: u32,
    ) -> Result<Vec<PropertyView>> {
        self.check()?;
        filter.validate()?;
        let properties = self.properties.lock().unwrap();
        Ok(properties
            .iter()
            .filter(|p| filter.owner_id.map_or(true, |owner| p.owner_id == Some(owner)))
            .map(|p| PropertyView {
                property: p.clone(),
                average_rating: 5.0,
            })
            .take(limit as usize)
            .collect())
    }

    async fn get_property_with_id(&self, id: i32) -> Result<Option<Property>> {
        self.check()?;
        let properties = self.properties.lock().unwrap();
        Ok(properties.iter().find(|p| p.id == id).cloned())
    }

    async fn add_property(&self, property: &NewProperty) -> Result<Property> {
        self.check()?;
        let mut properties = self.properties.lock().unwrap();
        let created = Property {
            id: properties.len() as i32 + 1,
            owner_id: property.owner_id,
            title: property.title.clone(),
            description: property.description.clone(),
            thumbnail_photo_url: property.thumbnail_photo_url.clone(),
            cover_photo_url: property.cover_photo_url.clone(),
            cost_per_night: property.cost_per_night,
            parking_spaces: property.parking_spaces,
            number_of_bathrooms: property.number_of_bathrooms,
            number_of_bedrooms: property.number_of_bedrooms,
            country: property.country.clone(),
            street: property.street.clone(),
            city: property.city.clone(),
            province: property.province.clone(),
            post_code: property.post_code.clone(),
        };
        properties.push(created.clone());
        Ok(created)
    }
}
