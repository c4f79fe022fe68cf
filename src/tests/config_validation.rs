#[cfg(test)]
mod test {

    use std::io::Write;

    use tempfile::NamedTempFile;

    use crate::config::loader::load_config;
    use crate::config::settings::LogFormat;

    fn write_config(yaml: &str) -> NamedTempFile {
        let mut file = NamedTempFile::new().expect("tempfile");
        file.write_all(yaml.as_bytes()).expect("write config");
        file
    }

    #[test]
    fn minimal_config_gets_logging_defaults() {
        let file = write_config(
            "server:\n  host: 127.0.0.1\n  port: \"8085\"\n",
        );

        let config = load_config(file.path()).expect("config should load");
        assert_eq!(config.server.host, "127.0.0.1");
        let logging = config.logging.expect("default logging");
        assert_eq!(logging.level, "info");
        assert_eq!(logging.format, LogFormat::Compact);
    }

    #[test]
    fn invalid_port_is_rejected() {
        let file = write_config(
            "server:\n  host: 127.0.0.1\n  port: \"not-a-port\"\n",
        );

        let err = load_config(file.path()).unwrap_err();
        assert!(err.to_string().contains("not a valid port"));
    }

    #[test]
    fn missing_file_is_an_error() {
        assert!(load_config("does/not/exist.yaml").is_err());
    }
}
