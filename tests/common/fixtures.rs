//! Fixture content shared by CLI and scenario tests

/// A runit site with two config files and no optional commands
pub const BASIC_CONFIG: &str = r#"
[target]
hosts = ["deploy@web1"]
deployment_dir = "/srv/app"

[git]
repository = "git://github.com/example/site.git"

[templates]
config_files = ["config", "database"]

[service]
directory = "/svc/app"

[ssh]
options = ["BatchMode=yes", "ConnectTimeout=1"]
"#;

/// Parameter defaults so `--yes` can answer everything
pub const PARAMETER_DEFAULTS: &str = r#"
[[parameters]]
name = "db_name"
default = "site"

[[parameters]]
name = "db_user"
default = "site"
"#;

pub const CONFIG_TEMPLATE: &str = "Ramaze.options.mode = :{mode}\n";

pub const DATABASE_TEMPLATE: &str = "{db_adapter}://{db_user}:{db_password}@{db_host}/{db_name}\n";

pub const RUN_TEMPLATE: &str = "#!/bin/sh\ncd {deployment_dir} && exec unicorn -c config/unicorn.rb\n";

pub const LOG_RUN_TEMPLATE: &str = "#!/bin/sh\nexec svlogd -tt ./main\n";
