//! Role guards.
//!
//! Mounted below [`super::middleware::handler`]; a caller whose role does not
//! match is rejected with 401.

use salvo::prelude::*;

use shopfront_app::domain::users::records::Role;

use crate::extensions::*;

/// Only buyer accounts may pass.
#[salvo::handler]
pub(crate) async fn require_buyer(
    req: &mut Request,
    depot: &mut Depot,
    res: &mut Response,
    ctrl: &mut FlowCtrl,
) {
    require_role(Role::Buyer, req, depot, res, ctrl).await;
}

/// Only seller accounts may pass.
#[salvo::handler]
pub(crate) async fn require_seller(
    req: &mut Request,
    depot: &mut Depot,
    res: &mut Response,
    ctrl: &mut FlowCtrl,
) {
    require_role(Role::Seller, req, depot, res, ctrl).await;
}

async fn require_role(
    role: Role,
    req: &mut Request,
    depot: &mut Depot,
    res: &mut Response,
    ctrl: &mut FlowCtrl,
) {
    match depot.identity_or_401() {
        Ok(identity) if identity.role == role => {
            ctrl.call_next(req, depot, res).await;
        }
        Ok(_identity) => {
            res.render(StatusError::unauthorized().brief(format!("Requires a {role} account")));
        }
        Err(status) => {
            res.render(status);
        }
    }
}
