use jvn_domain::EnvironmentName;

/// Advisory printed after a capture, explaining how to switch into the
/// environment.
pub fn activation_message(name: &EnvironmentName) -> String {
    format!(
        "#\n\
         # To activate this environment, use\n\
         #\n\
         #     $ conda activate {name}\n\
         #\n\
         # To deactivate an active environment, use\n\
         #\n\
         #     $ conda deactivate\n"
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn names_the_environment() {
        let text = activation_message(&EnvironmentName::new("ml"));
        assert!(text.contains("$ conda activate ml\n"));
        assert!(text.contains("$ conda deactivate"));
        assert!(text.lines().all(|line| line.starts_with('#')));
    }
}
