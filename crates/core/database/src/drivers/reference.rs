use std::{collections::HashMap, sync::Arc};

use futures::lock::Mutex;

use crate::{
    AreaCode, AuditLogEntry, Incident, IncidentMessage, Notification, Report, Session, User,
};

database_derived!(
    /// Reference implementation
    #[derive(Default)]
    pub struct ReferenceDb {
        pub users: Arc<Mutex<HashMap<String, User>>>,
        pub sessions: Arc<Mutex<HashMap<String, Session>>>,
        pub area_codes: Arc<Mutex<HashMap<String, AreaCode>>>,
        pub incidents: Arc<Mutex<HashMap<String, Incident>>>,
        pub messages: Arc<Mutex<HashMap<String, IncidentMessage>>>,
        pub reports: Arc<Mutex<HashMap<String, Report>>>,
        pub audit_logs: Arc<Mutex<HashMap<String, AuditLogEntry>>>,
        pub notifications: Arc<Mutex<HashMap<String, Notification>>>,
    }
);

impl ReferenceDb {
    /// Remove all stored data
    pub async fn clear(&self) {
        self.users.lock().await.clear();
        self.sessions.lock().await.clear();
        self.area_codes.lock().await.clear();
        self.incidents.lock().await.clear();
        self.messages.lock().await.clear();
        self.reports.lock().await.clear();
        self.audit_logs.lock().await.clear();
        self.notifications.lock().await.clear();
    }
}
