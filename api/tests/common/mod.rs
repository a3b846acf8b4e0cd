#![allow(dead_code)]

use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;

use actix_web::{
    body::MessageBody,
    dev::{ServiceFactory, ServiceRequest, ServiceResponse},
    web, App, Error,
};
use async_trait::async_trait;

use am_api::{create_app, AppState, Collaborators};
use am_core::domain::entities::user::{AccountStatus, NewUser, Role, User};
use am_core::domain::value_objects::VehicleSnapshot;
use am_core::errors::EnrichmentError;
use am_core::repositories::UserRepository;
use am_core::services::{PasswordHasher, VehicleSource};
use am_infra::ConsoleNotifier;
use am_shared::AppConfig;

pub const PASSWORD: &str = "correct-horse-battery";

/// Stand-in for the remote vehicle service
#[derive(Default)]
pub struct StubVehicles {
    vehicles: HashMap<i64, VehicleSnapshot>,
    delay: Option<Duration>,
}

impl StubVehicles {
    pub fn with(mut self, vehicle_id: i64, brand: &str, model: &str, year: i32, mileage: i64) -> Self {
        self.vehicles.insert(
            vehicle_id,
            VehicleSnapshot {
                vehicle_id: Some(vehicle_id),
                brand: brand.to_string(),
                model: model.to_string(),
                year,
                mileage,
            },
        );
        self
    }

    /// Answer every lookup only after `delay`
    pub fn slow(mut self, delay: Duration) -> Self {
        self.delay = Some(delay);
        self
    }
}

#[async_trait]
impl VehicleSource for StubVehicles {
    async fn fetch_vehicle(&self, vehicle_id: i64) -> Result<VehicleSnapshot, EnrichmentError> {
        if let Some(delay) = self.delay {
            actix_rt::time::sleep(delay).await;
        }
        self.vehicles
            .get(&vehicle_id)
            .cloned()
            .ok_or(EnrichmentError::Status(404))
    }
}

pub struct Harness {
    pub config: AppConfig,
    pub state: web::Data<AppState>,
    pub notifier: Arc<ConsoleNotifier>,
    pub users: Arc<dyn UserRepository>,
}

impl Harness {
    pub fn new() -> Self {
        Self::with_vehicles(StubVehicles::default())
    }

    pub fn with_vehicles(vehicles: StubVehicles) -> Self {
        Self::with_config(vehicles, |_| {})
    }

    pub fn with_config(vehicles: StubVehicles, configure: impl FnOnce(&mut AppConfig)) -> Self {
        let mut config = AppConfig::in_memory();
        config.auth.bcrypt_cost = 4;
        configure(&mut config);

        let notifier = Arc::new(ConsoleNotifier::new());
        let collaborators = Collaborators::in_memory(notifier.clone(), Arc::new(vehicles));
        let users = collaborators.users.clone();
        let state = web::Data::new(AppState::new(&config, collaborators));

        Self {
            config,
            state,
            notifier,
            users,
        }
    }

    pub fn app(
        &self,
    ) -> App<
        impl ServiceFactory<
            ServiceRequest,
            Config = (),
            Response = ServiceResponse<impl MessageBody>,
            Error = Error,
            InitError = (),
        >,
    > {
        create_app(self.state.clone(), &self.config.cors, self.config.server.max_payload_size)
    }

    /// Insert an account with `role` and return it with a bearer token
    pub async fn account(&self, username: &str, role: Role) -> (User, String) {
        let password_hash = PasswordHasher::new(4).hash(PASSWORD).unwrap();
        let user = self
            .users
            .create(NewUser {
                username: username.to_string(),
                email: format!("{}@example.com", username),
                password_hash,
                role,
                status: AccountStatus::Active,
            })
            .await
            .unwrap();
        let token = self.state.tokens.generate_access_token(&user).unwrap();
        (user, format!("Bearer {}", token.access_token))
    }

    /// Code from the latest OTP email sent to `email`
    pub fn last_code(&self, email: &str) -> String {
        let message = self.notifier.last_message_for(email).expect("no OTP email sent");
        message
            .body
            .split("is: ")
            .nth(1)
            .map(|rest| rest.chars().take_while(|c| c.is_ascii_digit()).collect())
            .expect("OTP body has no code")
    }
}
