use server::Binding;

fn main() -> std::process::ExitCode {
    server::launch(Binding::Classic)
}
