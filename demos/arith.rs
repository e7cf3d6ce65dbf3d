use task_runner::{SerialTaskRunner, TaskRunner};

fn add(x: i32, y: i32) -> i32 {
    x + y
}

fn sub(x: i32, y: i32) -> i32 {
    x - y
}

fn mul(x: i32, y: i32) -> i32 {
    x * y
}

fn rem(x: i32, y: i32) -> i32 {
    x % y
}

fn main() -> task_runner::Result<()> {
    tracing_subscriber::fmt::init();

    let mut runner = TaskRunner::<(i32, i32), i32, 4>::new();

    runner.configure_fixed([add, sub, mul, rem]);
    runner.run((5, 10))?;
    println!("{:?}", runner.collect()?);

    runner.configure_fixed([rem, mul, sub, add]);
    runner.run((5, 10))?;
    println!("{:?}", runner.collect()?);

    runner.run((5, 10))?;
    println!("sum: {}", runner.reduce()?);

    let mut serial = SerialTaskRunner::<(i32, i32), i32, 4>::new();
    serial.configure_fixed([add, sub, mul, rem]);
    serial.run((5, 10))?;
    println!("max: {}", serial.reduce_with(i32::max)?);

    Ok(())
}
