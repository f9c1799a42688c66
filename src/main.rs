use avatar_lens::app::{self, Flags};
use pico_args;

fn main() -> iced::Result {
    let mut args = pico_args::Arguments::from_env();

    let flags = Flags {
        face_id: args.opt_value_from_str("--face-id").unwrap(),
        nick_name: args.opt_value_from_str("--nick").unwrap(),
        size: args.opt_value_from_str("--size").unwrap(),
    };

    app::run(flags)
}
