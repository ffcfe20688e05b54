#[cfg(test)]
mod tests {
    use taskdesk::db;
    use taskdesk::db::users::Users;
    use taskdesk::libs::auth;
    use taskdesk::libs::user::Role;

    // Single test on purpose: it redirects HOME so that the default-path
    // constructors resolve into a throwaway directory, and parallel tests
    // mutating the environment would race.
    #[test]
    fn test_bootstrap_seeds_exactly_one_admin() {
        let temp_dir = tempfile::tempdir().unwrap();
        std::env::set_var("HOME", temp_dir.path());
        std::env::set_var("LOCALAPPDATA", temp_dir.path());

        db::bootstrap().unwrap();

        // The documented default credentials log in as an approved admin
        let session = auth::check_login("admin", "admin123").unwrap().expect("seeded admin can log in");
        assert_eq!(session.role, Role::Admin);
        assert!(session.approved);

        // Wrong password is a clean None, not an error
        assert!(auth::check_login("admin", "wrong").unwrap().is_none());

        // Running bootstrap again changes nothing
        db::bootstrap().unwrap();
        let admins: Vec<_> = Users::new()
            .unwrap()
            .approved_with_department()
            .unwrap()
            .into_iter()
            .filter(|u| u.role == Role::Admin)
            .collect();
        assert_eq!(admins.len(), 1);
        assert_eq!(admins[0].username, "admin");
    }
}
