use clap::Parser;
use rustmam_tools::DeviceArgs;

#[derive(Parser, Debug)]
#[command(name = "maminfo", about = "Open a tape device and print its bus address")]
struct Args {
    #[command(flatten)]
    device: DeviceArgs,
}

fn main() {
    env_logger::init();
    let args = Args::parse();
    println!("Opening device {}", args.device.device.display());
    let mut client = match args.device.open_client() {
        Ok(c) => c,
        Err(e) => {
            eprintln!("cannot open device: {e}");
            std::process::exit(1);
        }
    };
    match client.identify() {
        Ok(address) => println!("Device identifies itself as : {address}"),
        Err(e) => {
            eprintln!("identify failed: {e}");
            std::process::exit(1);
        }
    }
}
