use axum::body::Body;
use axum::http::header::*;
use axum::http::StatusCode;
use axum::http::Request;
use bytes::Bytes;
use serde::de::DeserializeOwned;
use serde::Serialize;
use tower::ServiceExt;

pub trait WithJsonBody<B: Serialize> {
    fn with_json_body(self, body: B) -> Request<Body>;
}

impl<B: Serialize> WithJsonBody<B> for http::request::Builder {
    fn with_json_body(self, body: B) -> Request<Body> {
        self.header(CONTENT_TYPE, mime::APPLICATION_JSON.as_ref())
            .body(Body::from(serde_json::to_vec(&body).unwrap()))
            .unwrap()
    }
}

pub trait EmptyBody {
    fn empty_body(self) -> Request<Body>;
}

impl EmptyBody for http::request::Builder {
    fn empty_body(self) -> Request<Body> {
        self.body(Body::empty()).unwrap()
    }
}

pub trait WithBearer {
    fn bearer(self, token: &str) -> Self;
}

impl WithBearer for http::request::Builder {
    fn bearer(self, token: &str) -> Self {
        self.header(AUTHORIZATION, format!("Bearer {token}"))
    }
}

pub async fn request(router: axum::Router, request: Request<Body>) -> (StatusCode, Bytes) {
    let response = router.oneshot(request).await.unwrap();
    let status = response.status();
    match axum::body::to_bytes(response.into_body(), usize::MAX).await {
        Ok(bytes) => (status, bytes),
        Err(_) => panic!("error while fetching body"),
    }
}

pub async fn request_json<B: DeserializeOwned>(
    router: axum::Router,
    request: Request<Body>,
) -> Result<(StatusCode, B), (StatusCode, Bytes)> {
    let (status, bytes) = self::request(router, request).await;
    serde_json::from_slice(&bytes)
        .map(|body| (status, body))
        .map_err(|_| (status, bytes))
}

pub fn test_secret() -> hmac::Hmac<sha2::Sha256> {
    use hmac::Mac;

    hmac::Hmac::<sha2::Sha256>::new_from_slice("foobar".as_bytes())
        .expect("HMAC-SHA-256 can accept any key length")
}

pub fn sign_token(claims: serde_json::Value) -> String {
    use jwt::SignWithKey;

    claims.sign_with_key(&test_secret()).unwrap()
}

///
/// In-memory stand-in for the Postgres repository, used for end-to-end route tests.
///
pub mod mem {
    use profile_domain::error::{PfError, PfResult};
    use profile_domain::profile::repo::*;

    use entrait::*;
    use std::sync::{Arc, Mutex};
    use time::OffsetDateTime;

    #[derive(Clone)]
    pub struct MemApp {
        profiles: Arc<Mutex<Vec<Profile>>>,
        jwt_secret: hmac::Hmac<sha2::Sha256>,
    }

    impl MemApp {
        pub fn new() -> Self {
            Self {
                profiles: Default::default(),
                jwt_secret: super::test_secret(),
            }
        }

        pub fn usernames(&self) -> Vec<String> {
            self.profiles
                .lock()
                .unwrap()
                .iter()
                .map(|profile| profile.username.clone())
                .collect()
        }
    }

    impl profile_domain::System for MemApp {
        // Pinned to the epoch so test tokens with a small `exp` are valid.
        fn get_current_time(&self) -> OffsetDateTime {
            OffsetDateTime::from_unix_timestamp(0).unwrap()
        }
    }

    impl profile_domain::GetConfig for MemApp {
        fn get_jwt_secret(&self) -> &hmac::Hmac<sha2::Sha256> {
            &self.jwt_secret
        }
    }

    impl DelegateProfileRepo<Self> for MemApp {
        type Target = MemProfileRepo;
    }

    pub trait GetProfileStore {
        fn profile_store(&self) -> &Mutex<Vec<Profile>>;
    }

    impl GetProfileStore for MemApp {
        fn profile_store(&self) -> &Mutex<Vec<Profile>> {
            &self.profiles
        }
    }

    impl<T: GetProfileStore> GetProfileStore for Impl<T> {
        fn profile_store(&self) -> &Mutex<Vec<Profile>> {
            (**self).profile_store()
        }
    }

    pub struct MemProfileRepo;

    #[entrait]
    impl ProfileRepoImpl for MemProfileRepo {
        pub async fn insert_profile(
            deps: &impl GetProfileStore,
            username: &str,
            display_name: Option<&str>,
            bio: Option<&str>,
        ) -> PfResult<Profile> {
            let mut profiles = deps.profile_store().lock().unwrap();
            if profiles.iter().any(|profile| profile.username == username) {
                return Err(PfError::UsernameTaken);
            }

            let profile = Profile {
                profile_id: ProfileId(uuid::Uuid::new_v4()),
                username: username.to_string(),
                display_name: display_name.map(str::to_string),
                bio: bio.map(str::to_string),
            };
            profiles.push(profile.clone());

            Ok(profile)
        }

        pub async fn select_profiles(deps: &impl GetProfileStore) -> PfResult<Vec<Profile>> {
            Ok(deps.profile_store().lock().unwrap().clone())
        }

        pub async fn find_profile_by_username(
            deps: &impl GetProfileStore,
            username: &str,
        ) -> PfResult<Option<Profile>> {
            Ok(deps
                .profile_store()
                .lock()
                .unwrap()
                .iter()
                .find(|profile| profile.username == username)
                .cloned())
        }

        pub async fn update_profile(
            deps: &impl GetProfileStore,
            username: &str,
            update: ProfileUpdate<'_>,
        ) -> PfResult<Option<Profile>> {
            let mut profiles = deps.profile_store().lock().unwrap();

            let Some(index) = profiles
                .iter()
                .position(|profile| profile.username == username)
            else {
                return Ok(None);
            };

            if let Some(new_username) = update.username {
                if new_username != username
                    && profiles.iter().any(|profile| profile.username == new_username)
                {
                    return Err(PfError::UsernameTaken);
                }
            }

            let profile = &mut profiles[index];

            if let Some(new_username) = update.username {
                profile.username = new_username.to_string();
            }
            if let Some(display_name) = update.display_name {
                profile.display_name = Some(display_name.to_string());
            }
            if let Some(bio) = update.bio {
                profile.bio = Some(bio.to_string());
            }

            Ok(Some(profile.clone()))
        }

        pub async fn delete_profile(deps: &impl GetProfileStore, username: &str) -> PfResult<()> {
            deps.profile_store()
                .lock()
                .unwrap()
                .retain(|profile| profile.username != username);
            Ok(())
        }
    }
}
