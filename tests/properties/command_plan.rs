//! Property tests for the command set derived from a target.

use proptest::prelude::*;

use sitedeploy::{CommandSet, SupervisorKind, TargetEnvironment};

fn remote_dir() -> impl Strategy<Value = String> {
    proptest::string::string_regex("/[a-z][a-z0-9_]{0,8}(/[a-z0-9_ ]{1,8}){0,3}").unwrap()
}

proptest! {
    #![proptest_config(ProptestConfig {
        cases: 96,
        .. ProptestConfig::default()
    })]

    /// PROPERTY: Every remote step that touches the working copy runs inside it.
    #[test]
    fn property_working_copy_steps_run_in_deployment_dir(
        deployment_dir in remote_dir(),
        service_dir in remote_dir(),
        systemd in any::<bool>(),
    ) {
        let mut env = TargetEnvironment::new(
            vec!["web1".to_string()],
            deployment_dir.clone(),
            service_dir,
            "git://example.com/site.git",
        );
        if systemd {
            env.supervisor = SupervisorKind::Systemd;
        }
        let commands = CommandSet::new(&env);

        for step in [&commands.update, &commands.init, &commands.pull] {
            prop_assert_eq!(step.cwd(), Some(deployment_dir.as_str()));
            prop_assert!(step.script().starts_with("cd "));
        }
        prop_assert_eq!(commands.create.cwd(), None);
    }

    /// PROPERTY: Service control always targets the configured service.
    #[test]
    fn property_service_control_names_service_dir(service_dir in remote_dir()) {
        let env = TargetEnvironment::new(
            vec!["web1".to_string()],
            "/srv/app",
            service_dir.clone(),
            "git://example.com/site.git",
        );
        let commands = CommandSet::new(&env);

        for (step, verb) in [(&commands.stop, "d"), (&commands.start, "start"), (&commands.status, "status")] {
            let command = &step.commands()[0];
            prop_assert_eq!(command.program(), "sv");
            prop_assert_eq!(command.arguments(), &[verb.to_string(), service_dir.clone()][..]);
        }
    }
}
