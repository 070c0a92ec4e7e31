//! Authenticated identity stored in the request depot.

use salvo::prelude::{Depot, StatusError};
use shopfront_app::auth::Identity;

pub(crate) trait IdentityExt {
    fn insert_identity(&mut self, identity: Identity);

    fn identity_or_401(&self) -> Result<Identity, StatusError>;
}

impl IdentityExt for Depot {
    fn insert_identity(&mut self, identity: Identity) {
        self.inject(identity);
    }

    fn identity_or_401(&self) -> Result<Identity, StatusError> {
        self.obtain::<Identity>()
            .copied()
            .map_err(|_ignored| StatusError::unauthorized().brief("Authentication required"))
    }
}
