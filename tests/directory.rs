#[cfg(test)]
mod tests {
    use taskdesk::db::db::Db;
    use taskdesk::db::departments::Departments;
    use taskdesk::db::users::Users;
    use taskdesk::libs::auth;
    use taskdesk::libs::session::Session;
    use taskdesk::libs::user::{NewUser, Role};
    use tempfile::TempDir;
    use test_context::{test_context, TestContext};

    struct DirectoryTestContext {
        temp_dir: TempDir,
    }

    impl TestContext for DirectoryTestContext {
        fn setup() -> Self {
            let temp_dir = tempfile::tempdir().unwrap();
            DirectoryTestContext { temp_dir }
        }
    }

    impl DirectoryTestContext {
        fn db(&self) -> Db {
            Db::open(self.temp_dir.path().join("taskdesk.db")).unwrap()
        }

        /// Seeds the bootstrap admin and returns its session.
        fn admin_session(&self) -> Session {
            let mut users = Users::with_db(self.db());
            users.ensure_admin_with("admin", "admin123").unwrap();
            let admin = users.find_by_username("admin").unwrap().unwrap();
            Session {
                user_id: admin.id.unwrap(),
                role: admin.role,
                approved: admin.approved,
                full_name: admin.full_name,
            }
        }

        fn member_session(&self) -> Session {
            Session {
                user_id: 42,
                role: Role::Member,
                approved: true,
                full_name: "Some Member".to_string(),
            }
        }

        fn new_user(&self, username: &str, department_id: Option<i64>) -> NewUser {
            NewUser {
                username: username.to_string(),
                password: "secret".to_string(),
                full_name: format!("{} Fullname", username),
                email: format!("{}@example.com", username),
                phone: "555-0100".to_string(),
                department_id,
            }
        }
    }

    #[test_context(DirectoryTestContext)]
    #[test]
    fn test_department_create_and_list(ctx: &mut DirectoryTestContext) {
        let admin = ctx.admin_session();
        let mut departments = Departments::with_db(ctx.db());

        assert!(departments.create(&admin, "Engineering").unwrap());
        assert!(departments.create(&admin, "Sales").unwrap());
        // Duplicate name is a no-op success, not an error
        assert!(!departments.create(&admin, "Engineering").unwrap());

        let all = departments.list().unwrap();
        let names: Vec<_> = all.iter().map(|d| d.name.as_str()).collect();
        assert_eq!(names, vec!["Engineering", "Sales"]);

        let first = departments.get_by_id(all[0].id).unwrap().unwrap();
        assert_eq!(first.name, "Engineering");
        assert!(departments.get_by_id(9999).unwrap().is_none());
    }

    #[test_context(DirectoryTestContext)]
    #[test]
    fn test_department_create_requires_admin(ctx: &mut DirectoryTestContext) {
        let mut departments = Departments::with_db(ctx.db());

        let err = departments.create(&ctx.member_session(), "Engineering").unwrap_err();
        assert!(err.to_string().contains("privileges"));
        assert!(departments.list().unwrap().is_empty());
    }

    #[test_context(DirectoryTestContext)]
    #[test]
    fn test_register_defaults_to_unapproved_member(ctx: &mut DirectoryTestContext) {
        let mut users = Users::with_db(ctx.db());

        let id = users.register(&ctx.new_user("alice", None)).unwrap();
        let alice = users.get_by_id(id).unwrap().unwrap();

        assert_eq!(alice.username, "alice");
        assert_eq!(alice.role, Role::Member);
        assert!(!alice.approved);
        // The password is stored hashed, never in the clear
        assert_ne!(alice.password_hash, "secret");
        assert!(auth::verify_password("secret", &alice.password_hash).unwrap());
    }

    #[test_context(DirectoryTestContext)]
    #[test]
    fn test_register_duplicate_username_fails(ctx: &mut DirectoryTestContext) {
        let mut users = Users::with_db(ctx.db());

        users.register(&ctx.new_user("alice", None)).unwrap();
        let err = users.register(&ctx.new_user("alice", None)).unwrap_err();
        assert!(err.to_string().contains("already exists"));

        // A distinct username still goes through
        users.register(&ctx.new_user("bob", None)).unwrap();
    }

    #[test_context(DirectoryTestContext)]
    #[test]
    fn test_register_rejects_bad_input(ctx: &mut DirectoryTestContext) {
        let mut users = Users::with_db(ctx.db());

        let mut empty_name = ctx.new_user("", None);
        empty_name.username = "  ".to_string();
        assert!(users.register(&empty_name).unwrap_err().to_string().contains("Username"));

        let mut empty_password = ctx.new_user("carol", None);
        empty_password.password = String::new();
        assert!(users.register(&empty_password).unwrap_err().to_string().contains("Password"));

        let err = users.register(&ctx.new_user("dave", Some(9999))).unwrap_err();
        assert!(err.to_string().contains("Department"));
    }

    #[test_context(DirectoryTestContext)]
    #[test]
    fn test_pending_then_approve(ctx: &mut DirectoryTestContext) {
        let admin = ctx.admin_session();
        let mut departments = Departments::with_db(ctx.db());
        departments.create(&admin, "Engineering").unwrap();
        let engineering = departments.list().unwrap()[0].id;

        let mut users = Users::with_db(ctx.db());
        let alice_id = users.register(&ctx.new_user("alice", Some(engineering))).unwrap();

        let pending = users.pending().unwrap();
        assert_eq!(pending.len(), 1);
        assert_eq!(pending[0].username, "alice");

        // Approving twice is harmless, unknown ids are a no-op
        users.approve(&admin, alice_id).unwrap();
        users.approve(&admin, alice_id).unwrap();
        users.approve(&admin, 9999).unwrap();

        assert!(users.pending().unwrap().is_empty());
        let approved = users.approved_with_department().unwrap();
        let alice = approved.iter().find(|u| u.username == "alice").unwrap();
        assert_eq!(alice.department.as_deref(), Some("Engineering"));
        assert_eq!(alice.department_label(), "Engineering");

        assert_eq!(users.department_of(alice_id).unwrap(), Some(engineering));
        assert_eq!(users.department_of(9999).unwrap(), None);
    }

    #[test_context(DirectoryTestContext)]
    #[test]
    fn test_approve_requires_admin(ctx: &mut DirectoryTestContext) {
        let mut users = Users::with_db(ctx.db());
        let alice_id = users.register(&ctx.new_user("alice", None)).unwrap();

        let err = users.approve(&ctx.member_session(), alice_id).unwrap_err();
        assert!(err.to_string().contains("privileges"));

        // An unapproved admin session is rejected as well
        let mut unapproved_admin = ctx.admin_session();
        unapproved_admin.approved = false;
        let err = users.approve(&unapproved_admin, alice_id).unwrap_err();
        assert!(err.to_string().contains("not approved"));
    }

    #[test_context(DirectoryTestContext)]
    #[test]
    fn test_set_password_rotates_credentials(ctx: &mut DirectoryTestContext) {
        let admin = ctx.admin_session();
        let mut users = Users::with_db(ctx.db());

        users.set_password(&admin, admin.user_id, "rotated-secret").unwrap();

        assert!(auth::check_login_with(&mut users, "admin", "admin123").unwrap().is_none());
        let session = auth::check_login_with(&mut users, "admin", "rotated-secret").unwrap().unwrap();
        assert_eq!(session.role, Role::Admin);
    }

    #[test_context(DirectoryTestContext)]
    #[test]
    fn test_set_password_denied_for_other_accounts(ctx: &mut DirectoryTestContext) {
        let mut users = Users::with_db(ctx.db());
        ctx.admin_session();
        let alice_id = users.register(&ctx.new_user("alice", None)).unwrap();
        let bob_id = users.register(&ctx.new_user("bob", None)).unwrap();

        let bob = Session {
            user_id: bob_id,
            role: Role::Member,
            approved: true,
            full_name: "Bob".to_string(),
        };
        // Bob may rotate his own password but not alice's
        users.set_password(&bob, bob_id, "bobs-new-secret").unwrap();
        let err = users.set_password(&bob, alice_id, "oops").unwrap_err();
        assert!(err.to_string().contains("privileges"));
    }

    #[test_context(DirectoryTestContext)]
    #[test]
    fn test_check_login_unapproved_account(ctx: &mut DirectoryTestContext) {
        let mut users = Users::with_db(ctx.db());
        users.register(&ctx.new_user("alice", None)).unwrap();

        // Login succeeds but the session is flagged unapproved;
        // privileged calls with it fail
        let session = auth::check_login_with(&mut users, "alice", "secret").unwrap().unwrap();
        assert!(!session.approved);
        assert!(session.require_manager().is_err());

        assert!(auth::check_login_with(&mut users, "alice", "wrong").unwrap().is_none());
        assert!(auth::check_login_with(&mut users, "nobody", "secret").unwrap().is_none());
    }
}
